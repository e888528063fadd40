use tracing::{debug, info};

use crate::{
    composition::{ComposedImage, PreviewAspect},
    countdown::CountdownState,
    filters::FilterEffect,
};

/// Which booth controls are clickable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub capture: bool,
    pub download: bool,
    pub restart: bool,
}

impl Default for Controls {
    /// Before the camera starts only "start" is available
    fn default() -> Self {
        Self {
            start: true,
            capture: false,
            download: false,
            restart: false,
        }
    }
}

/// The presentation side of the booth
///
/// The controller calls these to reflect its state; implementations render
/// them however the host toolkit wants.
pub trait BoothUi: Send {
    fn set_status(&mut self, text: &str);

    fn set_countdown(&mut self, state: CountdownState);

    fn set_controls(&mut self, controls: Controls);

    fn show_result(&mut self, image: &ComposedImage);

    fn clear_result(&mut self);

    /// Effect to apply continuously to the live preview
    fn set_live_filter(&mut self, effect: &FilterEffect);

    fn set_preview_aspect(&mut self, aspect: PreviewAspect);
}

/// UI that reports everything through the log
#[derive(Debug, Default)]
pub struct ConsoleUi {
    last_status: String,
}

impl ConsoleUi {
    pub fn last_status(&self) -> &str {
        &self.last_status
    }
}

impl BoothUi for ConsoleUi {
    fn set_status(&mut self, text: &str) {
        info!("📸 {}", text);
        self.last_status = text.to_string();
    }

    fn set_countdown(&mut self, state: CountdownState) {
        match state {
            CountdownState::Hidden => debug!("Countdown hidden"),
            shown => info!("   {}", shown),
        }
    }

    fn set_controls(&mut self, controls: Controls) {
        debug!("Controls: {:?}", controls);
    }

    fn show_result(&mut self, image: &ComposedImage) {
        info!("🖼️  Result ready: {} {}x{}", image.layout(), image.width(), image.height());
    }

    fn clear_result(&mut self) {
        debug!("Result cleared");
    }

    fn set_live_filter(&mut self, effect: &FilterEffect) {
        debug!("Live filter: {}", effect.css());
    }

    fn set_preview_aspect(&mut self, aspect: PreviewAspect) {
        debug!("Preview aspect: {:?}", aspect);
    }
}
