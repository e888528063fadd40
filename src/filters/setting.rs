use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filters::effect::{FilterEffect, FilterOp};

/// The filter a user can pick for the booth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSetting {
    #[default]
    None,
    Bw,
    Warm,
    Cool,
}

impl FilterSetting {
    pub const ALL: [FilterSetting; 4] = [Self::None, Self::Bw, Self::Warm, Self::Cool];

    /// Parse a filter identifier, case-insensitively. Never fails.
    pub fn parse(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "bw" => Self::Bw,
            "warm" => Self::Warm,
            "cool" => Self::Cool,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bw => "bw",
            Self::Warm => "warm",
            Self::Cool => "cool",
        }
    }

    /// The effect this filter stands for
    pub fn effect(&self) -> FilterEffect {
        match self {
            Self::None => FilterEffect::identity(),
            Self::Bw => FilterEffect::new(vec![FilterOp::Grayscale(1.0)]),
            Self::Warm => FilterEffect::new(vec![
                FilterOp::Sepia(0.4),
                FilterOp::Saturate(1.2),
            ]),
            Self::Cool => FilterEffect::new(vec![
                FilterOp::Contrast(1.1),
                FilterOp::Saturate(1.1),
                FilterOp::HueRotate(200.0),
            ]),
        }
    }
}

impl fmt::Display for FilterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!(FilterSetting::parse("bw"), FilterSetting::Bw);
        assert_eq!(FilterSetting::parse(" Warm "), FilterSetting::Warm);
        assert_eq!(FilterSetting::parse("COOL"), FilterSetting::Cool);
        assert_eq!(FilterSetting::parse("none"), FilterSetting::None);
    }

    #[test]
    fn test_unknown_identifiers_map_to_identity() {
        for identifier in ["", "sepia", "grayscale", "b w", "warmer", "🙂"] {
            let setting = FilterSetting::parse(identifier);
            assert_eq!(setting, FilterSetting::None, "identifier {:?}", identifier);
            assert!(setting.effect().is_identity());
        }
    }

    #[test]
    fn test_css_descriptors() {
        assert_eq!(FilterSetting::None.effect().css(), "none");
        assert_eq!(FilterSetting::Bw.effect().css(), "grayscale(1)");
        assert_eq!(FilterSetting::Warm.effect().css(), "sepia(0.4) saturate(1.2)");
        assert_eq!(
            FilterSetting::Cool.effect().css(),
            "contrast(1.1) saturate(1.1) hue-rotate(200deg)"
        );
    }

    #[test]
    fn test_display_matches_identifier() {
        for setting in FilterSetting::ALL {
            assert_eq!(FilterSetting::parse(&setting.to_string()), setting);
        }
    }
}
