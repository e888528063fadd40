//! # Layout Composition
//!
//! Places captured shots into a framed template (single photo, 3-shot strip
//! or 2x2 grid) using aspect-preserving cover crops, then encodes the result
//! as PNG.

pub mod canvas;
pub mod color;
pub mod composer;
pub mod geometry;
pub mod layout;

// Re-exports for convenience
pub use color::FrameColor;
pub use composer::{ComposedImage, LayoutComposer};
pub use geometry::{cover_crop, LayoutGeometry, Rect, SourceRegion};
pub use layout::{Layout, PreviewAspect};
