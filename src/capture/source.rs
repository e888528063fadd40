use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    capture::Frame,
    error::{CameraError, Result},
};

/// Which camera the booth asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Front-facing, looking at the user
    #[default]
    User,
    Environment,
}

/// What is requested from the platform when the camera starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConstraints {
    pub facing: Facing,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing: Facing::User,
            audio: false,
        }
    }
}

/// Core trait over the platform's live video capability
///
/// Implementations publish the frame size through a [`ReadinessSignal`] once
/// it is known; callers await [`Readiness::wait`] before grabbing pixels.
pub trait CaptureSource: Send {
    /// Returns a short name for logs
    fn name(&self) -> &str;

    /// Request camera access
    ///
    /// On failure the source stays unstarted and the error says why
    /// (permission denied, no device).
    fn start(&mut self, constraints: &CaptureConstraints) -> impl Future<Output = Result<()>> + Send;

    /// Handle for observing when frame dimensions become available
    fn readiness(&self) -> Readiness;

    /// Copy the current video frame
    ///
    /// Fails with [`CameraError::NotReady`] until both dimensions are known.
    fn grab_frame(&mut self) -> Result<Frame>;

    /// Release the camera
    fn stop(&mut self);
}

type Dimensions = Option<(u32, u32)>;

fn usable(dimensions: &Dimensions) -> bool {
    matches!(dimensions, Some((w, h)) if *w > 0 && *h > 0)
}

/// Publishing side of a source's readiness
#[derive(Debug)]
pub struct ReadinessSignal {
    tx: watch::Sender<Dimensions>,
}

impl ReadinessSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Announce the natural frame size
    pub fn publish(&self, width: u32, height: u32) {
        self.tx.send_replace(Some((width, height)));
    }

    /// Forget the frame size, e.g. after the camera stops
    pub fn reset(&self) {
        self.tx.send_replace(None);
    }

    pub fn subscribe(&self) -> Readiness {
        Readiness { rx: self.tx.subscribe() }
    }
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Observing side of a source's readiness
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<Dimensions>,
}

impl Readiness {
    /// Frame size if both dimensions are non-zero
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let current = *self.rx.borrow();
        current.filter(|_| usable(&current))
    }

    pub fn is_ready(&self) -> bool {
        self.dimensions().is_some()
    }

    /// Resolve once the frame size is known
    pub async fn wait(&mut self) -> Result<(u32, u32)> {
        let current = {
            let guard = self
                .rx
                .wait_for(usable)
                .await
                .map_err(|_| CameraError::StreamEnded)?;
            *guard
        };
        current.ok_or_else(|| CameraError::NotReady.into())
    }
}
