use tracing::debug;

use crate::{composition::Layout, config::CompositionConfig};

/// Integer placement rectangle on the output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Region of the source image that a cover crop keeps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale-and-center-crop so the source fills `dst_w` x `dst_h` without distortion
///
/// When the source is relatively wider than the destination the left and right
/// edges are trimmed equally, otherwise the top and bottom are.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> SourceRegion {
    let (sw, sh) = (src_w as f64, src_h as f64);
    let src_aspect = sw / sh;
    let dst_aspect = dst_w as f64 / dst_h as f64;

    if src_aspect > dst_aspect {
        let width = sh * dst_aspect;
        SourceRegion { x: (sw - width) / 2.0, y: 0.0, width, height: sh }
    } else {
        let height = sw / dst_aspect;
        SourceRegion { x: 0.0, y: (sh - height) / 2.0, width: sw, height }
    }
}

/// Round half up, as pixel sizes are specified
pub(crate) fn round_px(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

/// Output size and photo cell positions for one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Rect>,
}

impl LayoutGeometry {
    /// Compute the template from the first shot's natural size
    ///
    /// Paddings, gaps, borders and footers are fixed fractions of the cell, so
    /// the output scales with the capture resolution.
    pub fn for_layout(layout: Layout, shot_width: u32, shot_height: u32, config: &CompositionConfig) -> Self {
        let geometry = match layout {
            Layout::Single => Self::single(shot_width, shot_height),
            Layout::Strip => {
                let cell = shot_width.min(shot_height).min(config.strip_cell_max);
                Self::strip(cell)
            }
            Layout::Grid2x2 => {
                let cell = shot_width.min(shot_height).min(config.grid_cell_max);
                Self::grid(cell)
            }
        };

        debug!("{} geometry: {}x{} with {} cells", layout, geometry.width, geometry.height, geometry.cells.len());
        geometry
    }

    fn single(w: u32, h: u32) -> Self {
        let m = w.min(h) as f64;
        let pad = round_px(m * 0.04).max(18);
        let border = round_px(m * 0.05).max(14);
        let origin = border + pad;

        Self {
            width: w + pad * 2 + border * 2,
            height: h + pad * 2 + border * 2,
            cells: vec![Rect::new(origin, origin, w, h)],
        }
    }

    fn strip(cell: u32) -> Self {
        let c = cell as f64;
        let gap = round_px(c * 0.06);
        let pad = round_px(c * 0.08);
        let footer = round_px(c * 0.20);
        let border = round_px(c * 0.06).max(12);
        let origin = border + pad;

        let cells = (0..3)
            .map(|i| Rect::new(origin, origin + i * (cell + gap), cell, cell))
            .collect();

        Self {
            width: cell + pad * 2 + border * 2,
            height: pad * 2 + cell * 3 + gap * 2 + footer + border * 2,
            cells,
        }
    }

    fn grid(cell: u32) -> Self {
        let c = cell as f64;
        let gap = round_px(c * 0.06);
        let pad = round_px(c * 0.08);
        let footer = round_px(c * 0.18);
        let border = round_px(c * 0.06).max(12);
        let (x0, y0) = (border + pad, border + pad);
        let step = cell + gap;

        Self {
            width: pad * 2 + cell * 2 + gap + border * 2,
            height: pad * 2 + cell * 2 + gap + footer + border * 2,
            cells: vec![
                Rect::new(x0, y0, cell, cell),
                Rect::new(x0 + step, y0, cell, cell),
                Rect::new(x0, y0 + step, cell, cell),
                Rect::new(x0 + step, y0 + step, cell, cell),
            ],
        }
    }
}
