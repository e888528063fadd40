use image::{ImageBuffer, Rgb, RgbImage};

use crate::filters::FilterSetting;

/// A raw RGB pixel surface
///
/// This is a thin wrapper around an RGB image buffer that provides
/// the pixel access used by capture sources, filters and the composer.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Flip along the vertical axis
    pub fn mirror_horizontal(&mut self) {
        image::imageops::flip_horizontal_in_place(&mut self.buffer);
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    pub fn as_image_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }

    /// Create a frame from raw RGB bytes
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data)
            .map(|buffer| Self { buffer })
    }
}

/// One captured still, filtered and possibly mirrored
///
/// Shots are immutable once captured: the composer only ever reads them.
#[derive(Clone, Debug)]
pub struct Shot {
    frame: Frame,
    filter: FilterSetting,
    mirrored: bool,
}

impl Shot {
    pub(crate) fn new(frame: Frame, filter: FilterSetting, mirrored: bool) -> Self {
        Self { frame, filter, mirrored }
    }

    /// Wrap an already-processed frame, e.g. one loaded from disk
    pub fn from_frame(frame: Frame) -> Self {
        Self::new(frame, FilterSetting::None, false)
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The filter that was baked into the pixels
    pub fn filter(&self) -> FilterSetting {
        self.filter
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }
}
