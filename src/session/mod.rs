//! # Booth Session
//!
//! The [`Photobooth`] controller owns the capture source, the UI handle and
//! everything captured so far. It is driven by explicit commands, either by
//! calling its methods directly or through a [`BoothHandle`] that runs it on
//! its own task.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use picme::{
//!     capture::SyntheticSource,
//!     session::{Command, ConsoleUi, Photobooth},
//!     usage::DisabledUsageLogger,
//!     Config,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let booth = Photobooth::new(
//!     Config::default(),
//!     SyntheticSource::new(640, 480),
//!     ConsoleUi::default(),
//!     Box::new(DisabledUsageLogger),
//! );
//!
//! let handle = booth.spawn();
//! handle.dispatch(Command::SetLayout("strip".into())).await?;
//! handle.dispatch(Command::Start).await?;
//! handle.dispatch(Command::Capture).await?;
//! handle.dispatch(Command::Download { dir: None }).await?;
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod handle;
pub mod ui;

pub use controller::{BoothSettings, Photobooth};
pub use handle::{BoothHandle, CaptureGate, CapturePass, Command, Outcome};
pub use ui::{BoothUi, ConsoleUi, Controls};

/// Status lines shown to the user
pub mod status {
    pub const READY: &str = "Ready!";
    pub const CAMERA_READY: &str = "Camera is ready!";
    pub const CAMERA_DENIED: &str = "Could not access camera. Check permissions and reload the page.";
    pub const NOT_STARTED: &str = "Start the photobooth first!";
    pub const BUSY: &str = "A capture is already in progress.";
    pub const COMPOSING: &str = "Composing...";
    pub const DONE: &str = "Done!";
    pub const CAPTURE_FAILED: &str = "Something went wrong during capture.";
    pub const FRAME_COLOR_UPDATED: &str = "Frame color updated (next capture).";
    pub const CAMERA_STOPPED: &str = "Camera stopped.";

    /// "Get ready..." before each shot
    pub fn get_ready(shot: usize, total: usize) -> String {
        if total == 1 {
            "Get ready...".to_string()
        } else {
            format!("Get ready... ({}/{})", shot, total)
        }
    }

    /// "Captured!" after each shot
    pub fn captured(shot: usize, total: usize) -> String {
        if total == 1 {
            "Captured!".to_string()
        } else {
            format!("Captured {}/{}", shot, total)
        }
    }
}
