use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    capture::{CaptureConstraints, CaptureSource, Frame, Readiness, ReadinessSignal},
    error::{CameraError, Result},
};

/// Test-pattern capture source
///
/// Produces a horizontal red ramp and a vertical green ramp, or cycles through
/// a fixed palette of solid colors. Can simulate a late-arriving frame size
/// and a denied permission prompt.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    palette: Vec<[u8; 3]>,
    ready_after: Option<Duration>,
    deny_access: bool,
    started: bool,
    frames_grabbed: usize,
    last_constraints: Option<CaptureConstraints>,
    signal: Arc<ReadinessSignal>,
    pending: Option<JoinHandle<()>>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette: Vec::new(),
            ready_after: None,
            deny_access: false,
            started: false,
            frames_grabbed: 0,
            last_constraints: None,
            signal: Arc::new(ReadinessSignal::new()),
            pending: None,
        }
    }

    /// Emit solid frames, one palette entry per grab
    pub fn with_palette(mut self, palette: Vec<[u8; 3]>) -> Self {
        self.palette = palette;
        self
    }

    /// Publish the frame size only after a delay
    pub fn ready_after(mut self, delay: Duration) -> Self {
        self.ready_after = Some(delay);
        self
    }

    /// Refuse access as if the user dismissed the permission prompt
    pub fn deny_access(mut self) -> Self {
        self.deny_access = true;
        self
    }

    pub fn frames_grabbed(&self) -> usize {
        self.frames_grabbed
    }

    pub fn last_constraints(&self) -> Option<&CaptureConstraints> {
        self.last_constraints.as_ref()
    }

    fn render(&self) -> Frame {
        if !self.palette.is_empty() {
            let color = self.palette[self.frames_grabbed % self.palette.len()];
            return Frame::new_filled(self.width, self.height, color);
        }

        let (w, h) = (self.width.max(1), self.height.max(1));
        let tone = (self.frames_grabbed * 40 % 256) as u8;
        Frame::new(image::ImageBuffer::from_fn(self.width, self.height, |x, y| {
            image::Rgb([(x * 255 / w) as u8, (y * 255 / h) as u8, tone])
        }))
    }
}

impl CaptureSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn start(&mut self, constraints: &CaptureConstraints) -> Result<()> {
        self.last_constraints = Some(constraints.clone());

        if self.deny_access {
            return Err(CameraError::AccessDenied {
                reason: "permission denied by user".to_string(),
            }
            .into());
        }

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        self.started = true;
        match self.ready_after {
            Some(delay) => {
                let signal = self.signal.clone();
                let (width, height) = (self.width, self.height);
                self.pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    signal.publish(width, height);
                }));
            }
            None => self.signal.publish(self.width, self.height),
        }

        debug!("Synthetic source started at {}x{}", self.width, self.height);
        Ok(())
    }

    fn readiness(&self) -> Readiness {
        self.signal.subscribe()
    }

    fn grab_frame(&mut self) -> Result<Frame> {
        if !self.started || !self.signal.subscribe().is_ready() {
            return Err(CameraError::NotReady.into());
        }

        let frame = self.render();
        self.frames_grabbed += 1;
        Ok(frame)
    }

    fn stop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.started = false;
        self.signal.reset();
    }
}
