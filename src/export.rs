//! # Result Export
//!
//! Holds the most recent composed image for preview and download.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    composition::{ComposedImage, Layout},
    error::{ExportError, Result},
};

#[derive(Debug, Default)]
pub struct ResultExporter {
    last: Option<ComposedImage>,
}

impl ResultExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held image
    pub fn store(&mut self, image: ComposedImage) {
        self.last = Some(image);
    }

    pub fn preview(&self) -> Option<&ComposedImage> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Write the held image to `dir` as `picme_<kind>.png`
    ///
    /// Returns `None` when there is nothing to save.
    pub async fn download<P: AsRef<Path>>(&self, layout: Layout, dir: P) -> Result<Option<PathBuf>> {
        let Some(image) = &self.last else {
            debug!("Download requested with no composed image");
            return Ok(None);
        };

        let path = dir.as_ref().join(layout.download_filename());
        tokio::fs::write(&path, image.png_bytes())
            .await
            .map_err(|e| ExportError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Saved {}x{} image to {:?}", image.width(), image.height(), path);
        Ok(Some(path))
    }

    /// Drop the held image
    pub fn restart(&mut self) {
        self.last = None;
    }
}
