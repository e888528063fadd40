//! # Capture Module
//!
//! Wraps the live video capability behind [`CaptureSource`] and turns its
//! frames into filtered, optionally mirrored [`Shot`]s.
//!
//! Sources publish their frame size through a readiness channel instead of
//! being polled; [`FrameCapturer`] awaits it before reading any pixels.

pub mod capturer;
pub mod frame;
pub mod source;
pub mod still;
pub mod synthetic;

pub use capturer::FrameCapturer;
pub use frame::{Frame, Shot};
pub use source::{CaptureConstraints, CaptureSource, Facing, Readiness, ReadinessSignal};
pub use still::StillImageSource;
pub use synthetic::SyntheticSource;
