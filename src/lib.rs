//! # PicMe
//!
//! The core of a photobooth: a countdown, one to four captured shots with a
//! color filter baked in, and a framed composite ready to download as PNG.
//!
//! The booth talks to a camera through the [`CaptureSource`] trait and to
//! whatever draws it through the [`BoothUi`](session::BoothUi) trait, so the
//! same controller runs against a real device, a still image or a test pattern.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use picme::{
//!     capture::StillImageSource,
//!     session::ConsoleUi,
//!     usage::usage_sink,
//!     Config, Photobooth,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let logger = usage_sink(&config.usage);
//! let mut booth = Photobooth::new(
//!     config,
//!     StillImageSource::new("portrait.jpg"),
//!     ConsoleUi::default(),
//!     logger,
//! );
//!
//! booth.set_layout("grid");
//! booth.set_filter("warm");
//! booth.set_frame_color("#FFD700");
//!
//! booth.start().await?;
//! booth.capture().await?;
//! booth.download(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`capture`] - Capture sources and still shots
//! - [`countdown`] - The countdown overlay sequence
//! - [`filters`] - Color filters shared by preview and capture
//! - [`composition`] - Layout geometry and the framed composite
//! - [`export`] - Holding and saving the last result
//! - [`usage`] - Best-effort usage event logging
//! - [`session`] - The booth controller tying it all together
//! - [`config`] - Configuration management

pub mod capture;
pub mod composition;
pub mod config;
pub mod countdown;
pub mod error;
pub mod export;
pub mod filters;
pub mod session;
pub mod usage;

// Re-export commonly used types for convenience
pub use crate::{
    capture::{CaptureSource, Shot},
    composition::{ComposedImage, FrameColor, Layout},
    config::Config,
    error::{BoothError, Result},
    filters::FilterSetting,
    session::Photobooth,
};
