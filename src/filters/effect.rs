use std::fmt;

use rayon::prelude::*;

use crate::capture::Frame;

type Matrix = [[f32; 3]; 3];

/// One primitive of a filter chain, with CSS filter-function semantics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Amount in 0.0-1.0
    Grayscale(f32),
    /// Amount in 0.0-1.0
    Sepia(f32),
    /// 1.0 leaves colors unchanged
    Saturate(f32),
    /// 1.0 leaves colors unchanged
    Contrast(f32),
    /// Rotation in degrees
    HueRotate(f32),
}

impl FilterOp {
    /// Apply this primitive to a normalized RGB triple, clamping the result
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match (*self, self.matrix()) {
            (FilterOp::Contrast(amount), _) => {
                let intercept = 0.5 - 0.5 * amount;
                rgb.map(|c| c * amount + intercept)
            }
            (_, Some(m)) => multiply(&m, rgb),
            (_, None) => rgb,
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }

    /// Color matrix for the linear primitives; contrast is affine and has none
    fn matrix(&self) -> Option<Matrix> {
        let m = match *self {
            FilterOp::Grayscale(amount) => {
                let a = 1.0 - amount.clamp(0.0, 1.0);
                [
                    [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
                    [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
                    [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
                ]
            }
            FilterOp::Sepia(amount) => {
                let a = 1.0 - amount.clamp(0.0, 1.0);
                [
                    [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
                    [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
                    [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
                ]
            }
            FilterOp::Saturate(s) => [
                [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
            ],
            FilterOp::HueRotate(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                [
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ]
            }
            FilterOp::Contrast(_) => return None,
        };
        Some(m)
    }
}

fn multiply(m: &Matrix, rgb: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ]
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Grayscale(a) => write!(f, "grayscale({})", a),
            FilterOp::Sepia(a) => write!(f, "sepia({})", a),
            FilterOp::Saturate(s) => write!(f, "saturate({})", s),
            FilterOp::Contrast(c) => write!(f, "contrast({})", c),
            FilterOp::HueRotate(d) => write!(f, "hue-rotate({}deg)", d),
        }
    }
}

/// A composable visual transform: an ordered chain of filter primitives
///
/// The same value drives the live preview (through [`css`](Self::css)) and the
/// one-shot bake into captured pixels (through [`apply`](Self::apply)).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterEffect {
    ops: Vec<FilterOp>,
}

impl FilterEffect {
    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }

    /// The no-op effect
    pub fn identity() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// CSS `filter` property value for the live preview
    pub fn css(&self) -> String {
        if self.ops.is_empty() {
            return "none".to_string();
        }
        self.ops
            .iter()
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the chain over one 8-bit RGB pixel
    pub fn apply_pixel(&self, pixel: [u8; 3]) -> [u8; 3] {
        let mut rgb = pixel.map(|c| c as f32 / 255.0);
        for op in &self.ops {
            rgb = op.apply(rgb);
        }
        rgb.map(|c| (c * 255.0).round() as u8)
    }

    /// Bake the effect into every pixel of the frame
    pub fn apply(&self, frame: &mut Frame) {
        if self.is_identity() {
            return;
        }

        frame
            .as_image_mut()
            .par_chunks_mut(3)
            .for_each(|px| {
                let out = self.apply_pixel([px[0], px[1], px[2]]);
                px.copy_from_slice(&out);
            });
    }
}
