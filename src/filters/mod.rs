//! # Color Filters
//!
//! Maps the user's filter choice to an effect that can be shown on the live
//! preview (as a CSS filter string) and baked into captured pixels.
//!
//! ## Built-in Filters
//!
//! - **none**: identity
//! - **bw**: `grayscale(1)`
//! - **warm**: `sepia(0.4) saturate(1.2)`
//! - **cool**: `contrast(1.1) saturate(1.1) hue-rotate(200deg)`
//!
//! ## Usage
//!
//! ```rust
//! use picme::filters::{filter_effect, FilterSetting};
//!
//! let effect = filter_effect("warm");
//! assert_eq!(effect.css(), "sepia(0.4) saturate(1.2)");
//!
//! // Anything unknown is the identity
//! assert!(filter_effect("vaporwave").is_identity());
//! assert_eq!(FilterSetting::parse("BW"), FilterSetting::Bw);
//! ```

pub mod effect;
pub mod setting;

pub use effect::{FilterEffect, FilterOp};
pub use setting::FilterSetting;

/// Map a filter identifier to its effect. Unknown identifiers give the identity.
pub fn filter_effect(identifier: &str) -> FilterEffect {
    FilterSetting::parse(identifier).effect()
}
