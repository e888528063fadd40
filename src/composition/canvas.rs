use image::{imageops, GenericImage, Rgb, RgbImage};

use crate::{
    capture::Frame,
    composition::{
        geometry::{cover_crop, round_px, Rect},
        FrameColor,
    },
    error::{CompositionError, Result},
};

/// Output drawing surface for the composer
pub struct Canvas {
    buffer: RgbImage,
}

impl Canvas {
    /// New surface filled with the frame color
    pub fn new(width: u32, height: u32, background: FrameColor) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, Rgb(background.rgb())),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Place `source` into `dst` with a centered cover crop
    pub fn draw_cover(&mut self, source: &Frame, dst: Rect) -> Result<()> {
        let region = cover_crop(source.width(), source.height(), dst.width, dst.height);

        let sx = round_px(region.x).min(source.width().saturating_sub(1));
        let sy = round_px(region.y).min(source.height().saturating_sub(1));
        let sw = round_px(region.width).clamp(1, source.width() - sx);
        let sh = round_px(region.height).clamp(1, source.height() - sy);

        let cropped = imageops::crop_imm(source.as_image(), sx, sy, sw, sh).to_image();
        let placed = if (sw, sh) == (dst.width, dst.height) {
            cropped
        } else {
            imageops::resize(&cropped, dst.width, dst.height, imageops::FilterType::Triangle)
        };

        self.buffer
            .copy_from(&placed, dst.x, dst.y)
            .map_err(|e| CompositionError::EncodingFailed {
                reason: format!("photo does not fit at ({}, {}): {}", dst.x, dst.y, e),
            })?;
        Ok(())
    }

    /// Stroke a translucent white line centered on the rectangle's edge
    pub fn stroke_outline(&mut self, rect: Rect, alpha: f32) {
        let line = round_px(rect.width.min(rect.height) as f64 * 0.004).max(2);
        let inner = line / 2;
        let outer = line - inner;

        let left = rect.x.saturating_sub(outer);
        let top = rect.y.saturating_sub(outer);
        let right = (rect.x + rect.width + inner).min(self.width());
        let bottom = (rect.y + rect.height + inner).min(self.height());

        let inner_left = rect.x + inner;
        let inner_top = rect.y + inner;
        let inner_right = (rect.x + rect.width).saturating_sub(outer);
        let inner_bottom = (rect.y + rect.height).saturating_sub(outer);

        for y in top..bottom {
            for x in left..right {
                let inside = x >= inner_left && x < inner_right && y >= inner_top && y < inner_bottom;
                if !inside {
                    self.blend_white(x, y, alpha);
                }
            }
        }
    }

    fn blend_white(&mut self, x: u32, y: u32, alpha: f32) {
        let pixel = self.buffer.get_pixel_mut(x, y);
        for c in pixel.0.iter_mut() {
            *c = (*c as f32 * (1.0 - alpha) + 255.0 * alpha).round() as u8;
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.buffer
    }
}
