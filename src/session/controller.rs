use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    capture::{CaptureSource, FrameCapturer},
    composition::{FrameColor, Layout, LayoutComposer},
    config::Config,
    countdown::CountdownController,
    error::{CaptureError, Result},
    export::ResultExporter,
    filters::FilterSetting,
    session::{
        handle::Envelope, status, BoothHandle, BoothUi, CaptureGate, CapturePass, Command, Controls,
        Outcome,
    },
    usage::{UsageEvent, UsageSink},
};

/// User selections that shape the next capture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoothSettings {
    pub layout: Layout,
    pub filter: FilterSetting,
    /// Raw value of the color picker, if it was ever touched
    pub frame_picker: Option<String>,
    /// Raw value of the legacy frame selector
    pub frame_legacy: Option<String>,
}

impl BoothSettings {
    /// Frame color to use, picker first then legacy selector
    pub fn frame_color(&self) -> FrameColor {
        FrameColor::resolve(self.frame_picker.as_deref(), self.frame_legacy.as_deref())
    }
}

struct CaptureSession {
    started_at: Instant,
}

/// The booth controller
///
/// Owns the capture source and the UI, runs the countdown and capture
/// sequence, composes the result and keeps it for download.
pub struct Photobooth<S: CaptureSource, U: BoothUi> {
    config: Config,
    source: S,
    ui: U,
    usage: Box<dyn UsageSink>,
    settings: BoothSettings,
    session: Option<CaptureSession>,
    controls: Controls,
    exporter: ResultExporter,
    countdown: CountdownController,
    capturer: FrameCapturer,
    composer: LayoutComposer,
    gate: CaptureGate,
}

impl<S: CaptureSource, U: BoothUi> Photobooth<S, U> {
    pub fn new(config: Config, source: S, ui: U, usage: Box<dyn UsageSink>) -> Self {
        let mut booth = Self {
            countdown: CountdownController::from_config(&config.countdown),
            capturer: FrameCapturer::new(config.capture.mirror_output),
            composer: LayoutComposer::new(config.composition.clone()),
            config,
            source,
            ui,
            usage,
            settings: BoothSettings::default(),
            session: None,
            controls: Controls::default(),
            exporter: ResultExporter::new(),
            gate: CaptureGate::new(),
        };

        booth.ui.set_live_filter(&booth.settings.filter.effect());
        booth.ui.set_preview_aspect(booth.settings.layout.preview_aspect());
        booth.ui.set_controls(booth.controls);
        booth.restart();
        booth
    }

    pub fn settings(&self) -> &BoothSettings {
        &self.settings
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn exporter(&self) -> &ResultExporter {
        &self.exporter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Request the camera and attach it to the live preview
    pub async fn start(&mut self) -> Result<()> {
        info!("📷 Starting {} capture source", self.source.name());
        debug!("Shots mirrored: {}", self.capturer.mirrors());

        match self.source.start(&self.config.capture.constraints).await {
            Ok(()) => {
                self.session = Some(CaptureSession { started_at: Instant::now() });
                self.ui.set_live_filter(&self.settings.filter.effect());
                self.ui.set_preview_aspect(self.settings.layout.preview_aspect());
                self.set_status(status::CAMERA_READY);
                self.update_controls(|c| {
                    c.capture = true;
                    c.restart = true;
                });
                Ok(())
            }
            Err(e) => {
                error!("Could not start camera: {}", e);
                self.session = None;
                self.set_status(&e.user_message());
                self.update_controls(|c| {
                    c.capture = false;
                    c.restart = false;
                });
                Err(e)
            }
        }
    }

    /// Run the full countdown and capture sequence for the current layout
    pub async fn capture(&mut self) -> Result<()> {
        let Some(pass) = self.gate.try_acquire() else {
            warn!("Capture requested while another is in progress");
            return Err(CaptureError::Busy.into());
        };
        self.capture_with(pass).await
    }

    async fn capture_with(&mut self, _pass: CapturePass) -> Result<()> {
        if self.session.is_none() {
            self.set_status(status::NOT_STARTED);
            return Err(CaptureError::NotStarted.into());
        }

        self.update_controls(|c| {
            c.capture = false;
            c.start = false;
        });

        // Selections made during the sequence apply to the next one
        let settings = self.settings.clone();
        let result = self.run_sequence(&settings).await;

        if let Err(e) = &result {
            error!("Capture failed: {}", e);
            self.set_status(status::CAPTURE_FAILED);
        }

        self.update_controls(|c| {
            c.capture = true;
            c.start = true;
        });
        result
    }

    async fn run_sequence(&mut self, settings: &BoothSettings) -> Result<()> {
        let total = settings.layout.shot_count();
        let mut shots = Vec::with_capacity(total);

        for shot in 1..=total {
            self.set_status(&status::get_ready(shot, total));

            let ui = &mut self.ui;
            self.countdown.run(|state| ui.set_countdown(state)).await;

            shots.push(self.capturer.capture(&mut self.source, settings.filter).await?);
            self.set_status(&status::captured(shot, total));
        }

        self.set_status(status::COMPOSING);
        let frame_color = settings.frame_color();
        let image = self.composer.compose(settings.layout, &shots, frame_color)?;

        self.ui.show_result(&image);
        self.exporter.store(image);
        self.update_controls(|c| c.download = true);
        self.set_status(status::DONE);

        self.usage.record(UsageEvent::new(settings.layout, settings.filter, frame_color));
        Ok(())
    }

    /// Save the held result into `dir`, or the configured output directory
    ///
    /// The future borrows only the exporter.
    pub fn download(&self, dir: Option<PathBuf>) -> impl Future<Output = Result<Option<PathBuf>>> + Send + '_ {
        let dir = dir.unwrap_or_else(|| self.config.export.output_dir.clone());
        let layout = self.settings.layout;
        let exporter = &self.exporter;
        async move { exporter.download(layout, dir).await }
    }

    /// Discard the result and return to the ready state
    pub fn restart(&mut self) {
        self.exporter.restart();
        self.ui.clear_result();
        self.set_status(status::READY);
        self.update_controls(|c| c.download = false);
    }

    /// Release the camera
    pub fn stop(&mut self) {
        self.source.stop();
        if let Some(session) = self.session.take() {
            debug!("Camera session lasted {:?}", session.started_at.elapsed());
        }
        self.set_status(status::CAMERA_STOPPED);
        self.update_controls(|c| {
            c.start = true;
            c.capture = false;
            c.restart = false;
        });
    }

    pub fn set_layout(&mut self, value: &str) {
        self.settings.layout = Layout::parse(value);
        debug!("Layout set to {}", self.settings.layout);
        self.ui.set_preview_aspect(self.settings.layout.preview_aspect());
        self.restart();
    }

    pub fn set_filter(&mut self, value: &str) {
        self.settings.filter = FilterSetting::parse(value);
        debug!("Filter set to {}", self.settings.filter);
        self.ui.set_live_filter(&self.settings.filter.effect());
    }

    pub fn set_frame_color(&mut self, value: &str) {
        self.settings.frame_picker = Some(value.to_string());
        self.set_status(status::FRAME_COLOR_UPDATED);
    }

    pub fn set_legacy_frame(&mut self, value: &str) {
        self.settings.frame_legacy = Some(value.to_string());
    }

    /// Execute one command
    pub async fn handle(&mut self, command: Command) -> Result<Outcome> {
        self.execute(command, None).await
    }

    async fn execute(&mut self, command: Command, pass: Option<CapturePass>) -> Result<Outcome> {
        match command {
            Command::Start => self.start().await?,
            Command::Capture => match pass {
                Some(pass) => self.capture_with(pass).await?,
                None => self.capture().await?,
            },
            Command::Download { dir } => {
                let dir = dir.unwrap_or_else(|| self.config.export.output_dir.clone());
                let saved = self.exporter.download(self.settings.layout, dir).await?;
                return Ok(Outcome::Saved(saved));
            }
            Command::Restart => self.restart(),
            Command::Stop => self.stop(),
            Command::SetLayout(value) => self.set_layout(&value),
            Command::SetFilter(value) => self.set_filter(&value),
            Command::SetFrameColor(value) => self.set_frame_color(&value),
            Command::SetLegacyFrame(value) => self.set_legacy_frame(&value),
        }
        Ok(Outcome::Done)
    }

    /// Move the booth onto its own task and return a handle to drive it
    ///
    /// The task ends when every handle has been dropped.
    pub fn spawn(self) -> BoothHandle
    where
        S: 'static,
        U: 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let handle = BoothHandle::new(tx, self.gate.clone());
        tokio::spawn(self.run(rx));
        handle
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Envelope>) {
        while let Some(envelope) = rx.recv().await {
            debug!("Booth command: {:?}", envelope.command);
            let outcome = self.execute(envelope.command, envelope.pass).await;
            if envelope.reply.send(outcome).is_err() {
                debug!("Command sender went away before the reply");
            }
        }

        self.source.stop();
        info!("Booth controller stopped");
    }

    fn set_status(&mut self, text: &str) {
        self.ui.set_status(text);
    }

    fn update_controls<F: FnOnce(&mut Controls)>(&mut self, change: F) {
        change(&mut self.controls);
        self.ui.set_controls(self.controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureConstraints, Frame, Readiness, ReadinessSignal, SyntheticSource};
    use crate::composition::{ComposedImage, LayoutGeometry, PreviewAspect};
    use crate::countdown::CountdownState;
    use crate::error::{BoothError, CameraError};
    use crate::filters::FilterEffect;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[derive(Debug, Default)]
    struct UiLog {
        statuses: Vec<String>,
        countdown: Vec<CountdownState>,
        controls: Vec<Controls>,
        results: usize,
        cleared: usize,
        live_filter: String,
        aspect: Option<PreviewAspect>,
    }

    #[derive(Clone, Default)]
    struct RecordingUi {
        log: Arc<Mutex<UiLog>>,
    }

    impl BoothUi for RecordingUi {
        fn set_status(&mut self, text: &str) {
            self.log.lock().unwrap().statuses.push(text.to_string());
        }

        fn set_countdown(&mut self, state: CountdownState) {
            self.log.lock().unwrap().countdown.push(state);
        }

        fn set_controls(&mut self, controls: Controls) {
            self.log.lock().unwrap().controls.push(controls);
        }

        fn show_result(&mut self, _image: &ComposedImage) {
            self.log.lock().unwrap().results += 1;
        }

        fn clear_result(&mut self) {
            self.log.lock().unwrap().cleared += 1;
        }

        fn set_live_filter(&mut self, effect: &FilterEffect) {
            self.log.lock().unwrap().live_filter = effect.css();
        }

        fn set_preview_aspect(&mut self, aspect: PreviewAspect) {
            self.log.lock().unwrap().aspect = Some(aspect);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<UsageEvent>>>,
    }

    impl UsageSink for RecordingSink {
        fn record(&self, event: UsageEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Source that starts fine but loses its stream on the first grab
    struct BrokenSource {
        signal: ReadinessSignal,
    }

    impl CaptureSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn start(&mut self, _constraints: &CaptureConstraints) -> Result<()> {
            self.signal.publish(64, 48);
            Ok(())
        }

        fn readiness(&self) -> Readiness {
            self.signal.subscribe()
        }

        fn grab_frame(&mut self) -> Result<Frame> {
            Err(CameraError::StreamEnded.into())
        }

        fn stop(&mut self) {
            self.signal.reset();
        }
    }

    /// Source that notes how far the countdown had got at every grab
    struct WitnessSource {
        signal: ReadinessSignal,
        ui: RecordingUi,
        smiles_at_grab: Vec<usize>,
        hidden_at_grab: Vec<bool>,
    }

    impl CaptureSource for WitnessSource {
        fn name(&self) -> &str {
            "witness"
        }

        async fn start(&mut self, _constraints: &CaptureConstraints) -> Result<()> {
            self.signal.publish(64, 48);
            Ok(())
        }

        fn readiness(&self) -> Readiness {
            self.signal.subscribe()
        }

        fn grab_frame(&mut self) -> Result<Frame> {
            self.smiles_at_grab.push(smiles(&self.ui));
            let hidden = self.ui.log.lock().unwrap().countdown.last() == Some(&CountdownState::Hidden);
            self.hidden_at_grab.push(hidden);
            Ok(Frame::new_filled(64, 48, [90, 90, 90]))
        }

        fn stop(&mut self) {
            self.signal.reset();
        }
    }

    const RED: [u8; 3] = [200, 30, 30];
    const GREEN: [u8; 3] = [30, 200, 30];
    const BLUE: [u8; 3] = [30, 30, 200];
    const YELLOW: [u8; 3] = [220, 220, 40];

    fn booth(source: SyntheticSource) -> (Photobooth<SyntheticSource, RecordingUi>, RecordingUi, RecordingSink) {
        let ui = RecordingUi::default();
        let sink = RecordingSink::default();
        let booth = Photobooth::new(Config::default(), source, ui.clone(), Box::new(sink.clone()));
        (booth, ui, sink)
    }

    fn decode(image: &ComposedImage) -> image::RgbImage {
        image::load_from_memory(image.png_bytes()).unwrap().to_rgb8()
    }

    fn cell_centres(layout: Layout) -> Vec<(u32, u32)> {
        LayoutGeometry::for_layout(layout, 640, 480, &Default::default())
            .cells
            .iter()
            .map(|c| (c.x + c.width / 2, c.y + c.height / 2))
            .collect()
    }

    fn smiles(ui: &RecordingUi) -> usize {
        ui.log
            .lock()
            .unwrap()
            .countdown
            .iter()
            .filter(|s| **s == CountdownState::Smile)
            .count()
    }

    #[test]
    fn test_initial_state() {
        let (booth, ui, _) = booth(SyntheticSource::new(640, 480));
        let log = ui.log.lock().unwrap();

        assert_eq!(log.statuses.last().unwrap(), status::READY);
        assert_eq!(log.live_filter, "none");
        assert_eq!(log.aspect, Some(PreviewAspect::FourByThree));
        assert_eq!(booth.controls(), Controls::default());
        assert!(!booth.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_capture_flow() {
        let (mut booth, ui, sink) = booth(SyntheticSource::new(640, 480).with_palette(vec![RED]));

        booth.start().await.unwrap();
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::CAMERA_READY);
        assert!(booth.controls().capture);

        booth.capture().await.unwrap();

        assert_eq!(booth.source().frames_grabbed(), 1);
        assert_eq!(smiles(&ui), 1);

        let image = booth.exporter().preview().unwrap();
        assert_eq!((image.width(), image.height()), (726, 566));
        let pixels = decode(image);
        assert_eq!(pixels.get_pixel(0, 0).0, [255, 255, 255]);
        let (cx, cy) = cell_centres(Layout::Single)[0];
        assert_eq!(pixels.get_pixel(cx, cy).0, RED);

        let log = ui.log.lock().unwrap();
        let expected = ["Get ready...", "Captured!", status::COMPOSING, status::DONE];
        assert!(log.statuses.ends_with(&expected.map(String::from)));
        assert_eq!(log.results, 1);
        assert!(booth.controls().download);
        assert!(booth.controls().capture);
        assert!(booth.controls().start);

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].layout, "single");
        assert_eq!(events[0].filter, "none");
        assert_eq!(events[0].frame, "#FFFFFF");
    }

    #[tokio::test(start_paused = true)]
    async fn test_strip_captures_three_shots_in_order() {
        let (mut booth, ui, _) = booth(SyntheticSource::new(640, 480).with_palette(vec![RED, GREEN, BLUE]));
        booth.set_layout("strip");
        assert_eq!(ui.log.lock().unwrap().aspect, Some(PreviewAspect::Square));

        booth.start().await.unwrap();
        booth.capture().await.unwrap();

        assert_eq!(booth.source().frames_grabbed(), 3);
        assert_eq!(smiles(&ui), 3);

        let pixels = decode(booth.exporter().preview().unwrap());
        for ((x, y), color) in cell_centres(Layout::Strip).into_iter().zip([RED, GREEN, BLUE]) {
            assert_eq!(pixels.get_pixel(x, y).0, color);
        }

        let log = ui.log.lock().unwrap();
        for text in ["Get ready... (1/3)", "Captured 1/3", "Get ready... (3/3)", "Captured 3/3"] {
            assert!(log.statuses.iter().any(|s| s == text), "missing status {:?}", text);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_shot_follows_its_own_countdown() {
        for (layout, expected) in [("strip", vec![1, 2, 3]), ("grid2x2", vec![1, 2, 3, 4])] {
            let ui = RecordingUi::default();
            let source = WitnessSource {
                signal: ReadinessSignal::new(),
                ui: ui.clone(),
                smiles_at_grab: Vec::new(),
                hidden_at_grab: Vec::new(),
            };
            let mut booth = Photobooth::new(Config::default(), source, ui, Box::new(RecordingSink::default()));
            booth.set_layout(layout);

            booth.start().await.unwrap();
            booth.capture().await.unwrap();

            assert_eq!(booth.source().smiles_at_grab, expected, "layout {}", layout);
            assert!(booth.source().hidden_at_grab.iter().all(|h| *h));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_grid_uses_legacy_frame() {
        let (mut booth, _, sink) =
            booth(SyntheticSource::new(640, 480).with_palette(vec![RED, GREEN, BLUE, YELLOW]));
        booth.set_layout("2x2");
        booth.set_legacy_frame("gold");

        booth.start().await.unwrap();
        booth.capture().await.unwrap();
        assert_eq!(booth.source().frames_grabbed(), 4);

        let image = booth.exporter().preview().unwrap();
        let pixels = decode(image);
        assert_eq!(pixels.get_pixel(0, 0).0, [255, 215, 0]);
        for ((x, y), color) in cell_centres(Layout::Grid2x2).into_iter().zip([RED, GREEN, BLUE, YELLOW]) {
            assert_eq!(pixels.get_pixel(x, y).0, color);
        }

        assert_eq!(sink.events.lock().unwrap()[0].frame, "#FFD700");
        assert_eq!(sink.events.lock().unwrap()[0].layout, "grid2x2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_picker_color_wins_over_legacy() {
        let (mut booth, ui, _) = booth(SyntheticSource::new(640, 480).with_palette(vec![RED]));
        booth.set_legacy_frame("gold");
        booth.set_frame_color("#000000");
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::FRAME_COLOR_UPDATED);

        booth.start().await.unwrap();
        booth.capture().await.unwrap();

        let pixels = decode(booth.exporter().preview().unwrap());
        assert_eq!(pixels.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_camera_blocks_capture() {
        let (mut booth, ui, sink) = booth(SyntheticSource::new(640, 480).deny_access());

        let err = booth.start().await.unwrap_err();
        assert!(!err.is_recoverable());
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::CAMERA_DENIED);
        assert!(!booth.controls().capture);
        assert!(!booth.controls().restart);

        let err = booth.capture().await.unwrap_err();
        assert!(matches!(err, BoothError::Capture(CaptureError::NotStarted)));
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::NOT_STARTED);
        assert_eq!(booth.source().frames_grabbed(), 0);
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_capture_reenables_controls() {
        let ui = RecordingUi::default();
        let source = BrokenSource { signal: ReadinessSignal::new() };
        let mut booth = Photobooth::new(Config::default(), source, ui.clone(), Box::new(RecordingSink::default()));

        booth.start().await.unwrap();
        assert!(booth.capture().await.is_err());

        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::CAPTURE_FAILED);
        assert!(booth.controls().capture);
        assert!(booth.controls().start);
        assert!(!booth.controls().download);
        assert!(!booth.gate().is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_refused_while_gate_held() {
        let (mut booth, _, _) = booth(SyntheticSource::new(640, 480));
        booth.start().await.unwrap();

        let _pass = booth.gate().try_acquire().unwrap();
        let err = booth.capture().await.unwrap_err();
        assert!(matches!(err, BoothError::Capture(CaptureError::Busy)));
        assert_eq!(booth.source().frames_grabbed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_twice_clears_result() {
        let (mut booth, ui, _) = booth(SyntheticSource::new(640, 480));
        booth.start().await.unwrap();
        booth.capture().await.unwrap();
        assert!(booth.exporter().preview().is_some());

        booth.restart();
        booth.restart();

        assert!(booth.exporter().is_empty());
        assert!(!booth.controls().download);
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::READY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_layout_change_discards_result() {
        let (mut booth, _, _) = booth(SyntheticSource::new(640, 480));
        booth.start().await.unwrap();
        booth.capture().await.unwrap();

        booth.set_layout("grid");
        assert_eq!(booth.settings().layout, Layout::Grid2x2);
        assert!(booth.exporter().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_releases_camera() {
        let (mut booth, ui, _) = booth(SyntheticSource::new(640, 480));
        booth.start().await.unwrap();
        booth.stop();

        assert!(!booth.is_started());
        assert!(!booth.controls().capture);
        assert_eq!(ui.log.lock().unwrap().statuses.last().unwrap(), status::CAMERA_STOPPED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_rejects_concurrent_capture() {
        let (booth, ui, sink) = booth(SyntheticSource::new(640, 480));
        let handle = booth.spawn();

        handle.dispatch(Command::SetFilter("warm".into())).await.unwrap();
        handle.dispatch(Command::Start).await.unwrap();

        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.dispatch(Command::Capture).await }
        });
        tokio::task::yield_now().await;
        assert!(handle.is_capturing());

        let err = handle.dispatch(Command::Capture).await.unwrap_err();
        assert!(matches!(err, BoothError::Capture(CaptureError::Busy)));

        // Queued behind the running capture, so the shot keeps "warm"
        handle.dispatch(Command::SetFilter("bw".into())).await.unwrap();

        assert_eq!(first.await.unwrap().unwrap(), Outcome::Done);
        assert!(!handle.is_capturing());
        assert_eq!(smiles(&ui), 1);

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].filter, "warm");
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_download() {
        let dir = tempdir().unwrap();
        let (booth, _, _) = booth(SyntheticSource::new(640, 480));
        let handle = booth.spawn();

        let nothing = handle
            .dispatch(Command::Download { dir: Some(dir.path().to_path_buf()) })
            .await
            .unwrap();
        assert_eq!(nothing, Outcome::Saved(None));

        handle.dispatch(Command::SetLayout("strip".into())).await.unwrap();
        handle.dispatch(Command::Start).await.unwrap();
        handle.dispatch(Command::Capture).await.unwrap();

        let saved = handle
            .dispatch(Command::Download { dir: Some(dir.path().to_path_buf()) })
            .await
            .unwrap();
        assert_eq!(saved, Outcome::Saved(Some(dir.path().join("picme_strip.png"))));
        assert!(dir.path().join("picme_strip.png").exists());
    }
}
