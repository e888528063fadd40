use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use tracing::{debug, info};

use crate::{
    capture::Shot,
    composition::{canvas::Canvas, FrameColor, Layout, LayoutGeometry},
    config::CompositionConfig,
    error::{CompositionError, Result},
};

/// Final encoded photobooth image
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
    layout: Layout,
}

impl ComposedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Encoded PNG bytes
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:` URL suitable for an `<img src>` or a download link
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&self.png))
    }
}

/// Assembles captured shots into a framed layout
#[derive(Debug, Clone, Default)]
pub struct LayoutComposer {
    config: CompositionConfig,
}

impl LayoutComposer {
    pub fn new(config: CompositionConfig) -> Self {
        Self { config }
    }

    /// Compose and PNG-encode the shots
    ///
    /// The shot list must hold exactly as many shots as the layout needs, in
    /// capture order.
    pub fn compose(&self, layout: Layout, shots: &[Shot], frame_color: FrameColor) -> Result<ComposedImage> {
        let canvas = self.render(layout, shots, frame_color)?;
        let (width, height) = (canvas.width(), canvas.height());
        let png = encode_png(canvas)?;

        info!("Composed {} image {}x{} ({} KB)", layout, width, height, png.len() / 1024);
        Ok(ComposedImage { png, width, height, layout })
    }

    /// Draw the layout without encoding it
    pub fn render(&self, layout: Layout, shots: &[Shot], frame_color: FrameColor) -> Result<Canvas> {
        if shots.len() != layout.shot_count() {
            return Err(CompositionError::ShotCountMismatch {
                layout: layout.to_string(),
                expected: layout.shot_count(),
                actual: shots.len(),
            }
            .into());
        }
        if let Some(index) = shots.iter().position(|s| s.frame().is_empty()) {
            return Err(CompositionError::EmptyShot { index }.into());
        }

        let first = &shots[0];
        let geometry = LayoutGeometry::for_layout(layout, first.width(), first.height(), &self.config);

        let mut canvas = Canvas::new(geometry.width, geometry.height, frame_color);
        for (i, (shot, cell)) in shots.iter().zip(geometry.cells.iter()).enumerate() {
            debug!("Placing shot {} ({}x{}) at {:?}", i + 1, shot.width(), shot.height(), cell);
            canvas.draw_cover(shot.frame(), *cell)?;
            canvas.stroke_outline(*cell, self.config.outline_alpha);
        }

        Ok(canvas)
    }
}

fn encode_png(canvas: Canvas) -> Result<Vec<u8>> {
    let image = canvas.into_image();
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(|e| CompositionError::EncodingFailed { reason: e.to_string() })?;
    Ok(png)
}
