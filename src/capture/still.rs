use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    capture::{CaptureConstraints, CaptureSource, Frame, Readiness, ReadinessSignal},
    error::{BoothError, CameraError, Result},
};

/// Capture source backed by a photo on disk
///
/// Every grabbed frame is the same picture, which makes this source handy for
/// headless runs and kiosks without a camera.
pub struct StillImageSource {
    path: PathBuf,
    frame: Option<Frame>,
    signal: ReadinessSignal,
}

impl StillImageSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            frame: None,
            signal: ReadinessSignal::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureSource for StillImageSource {
    fn name(&self) -> &str {
        "still-image"
    }

    async fn start(&mut self, constraints: &CaptureConstraints) -> Result<()> {
        debug!("Opening {:?} (facing {:?}, audio {})", self.path, constraints.facing, constraints.audio);

        let path = self.path.clone();
        let image = tokio::task::spawn_blocking(move || image::open(&path))
            .await
            .map_err(|e| BoothError::generic(format!("Image loader task failed: {}", e)))?
            .map_err(|e| CameraError::NoDevice {
                details: format!("{}: {}", self.path.display(), e),
            })?;

        let frame = Frame::new(image.to_rgb8());
        info!("Still image source ready: {}x{}", frame.width(), frame.height());

        self.signal.publish(frame.width(), frame.height());
        self.frame = Some(frame);
        Ok(())
    }

    fn readiness(&self) -> Readiness {
        self.signal.subscribe()
    }

    fn grab_frame(&mut self) -> Result<Frame> {
        match &self.frame {
            Some(frame) if !frame.is_empty() => Ok(frame.clone()),
            _ => Err(CameraError::NotReady.into()),
        }
    }

    fn stop(&mut self) {
        self.frame = None;
        self.signal.reset();
    }
}
