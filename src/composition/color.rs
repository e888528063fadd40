use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Uniform fill behind and around the composed photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameColor([u8; 3]);

impl FrameColor {
    pub const WHITE: FrameColor = FrameColor([0xFF, 0xFF, 0xFF]);
    pub const BLACK: FrameColor = FrameColor([0x00, 0x00, 0x00]);
    pub const GOLD: FrameColor = FrameColor([0xFF, 0xD7, 0x00]);

    pub fn new(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional)
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Self([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self([short(0)?, short(1)?, short(2)?]))
            }
            _ => None,
        }
    }

    /// Map the old discrete frame selector: gold, simple, and everything else is black
    pub fn from_legacy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "gold" => Self::GOLD,
            "simple" => Self::WHITE,
            _ => Self::BLACK,
        }
    }

    /// Pick the frame color from the color picker and the legacy selector
    ///
    /// A usable picker value wins; otherwise the legacy selector if one is
    /// present; otherwise white.
    pub fn resolve(picker: Option<&str>, legacy: Option<&str>) -> Self {
        if let Some(value) = picker.filter(|v| !v.trim().is_empty()) {
            match Self::parse_hex(value) {
                Some(color) => return color,
                None => warn!("Ignoring unparseable frame color {:?}", value),
            }
        }

        match legacy {
            Some(value) => Self::from_legacy(value),
            None => Self::WHITE,
        }
    }
}

impl Default for FrameColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for FrameColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for FrameColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| ConfigError::InvalidValue {
            key: "frame_color".to_string(),
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for FrameColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameColor> for String {
    fn from(color: FrameColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(FrameColor::parse_hex("#FFD700"), Some(FrameColor::GOLD));
        assert_eq!(FrameColor::parse_hex("ffd700"), Some(FrameColor::GOLD));
        assert_eq!(FrameColor::parse_hex("#fff"), Some(FrameColor::WHITE));
        assert_eq!(FrameColor::parse_hex("#12345"), None);
        assert_eq!(FrameColor::parse_hex("#GGGGGG"), None);
        assert_eq!(FrameColor::parse_hex("#ééé"), None);
    }

    #[test]
    fn test_legacy_mapping() {
        assert_eq!(FrameColor::from_legacy("gold"), FrameColor::GOLD);
        assert_eq!(FrameColor::from_legacy("GOLD"), FrameColor::GOLD);
        assert_eq!(FrameColor::from_legacy("simple"), FrameColor::WHITE);
        assert_eq!(FrameColor::from_legacy("none"), FrameColor::BLACK);
        assert_eq!(FrameColor::from_legacy("polaroid"), FrameColor::BLACK);
    }

    #[test]
    fn test_picker_wins_over_legacy() {
        assert_eq!(
            FrameColor::resolve(Some("#336699"), Some("gold")),
            FrameColor::new([0x33, 0x66, 0x99])
        );
        assert_eq!(FrameColor::resolve(Some(""), Some("gold")), FrameColor::GOLD);
        assert_eq!(FrameColor::resolve(Some("nope"), Some("simple")), FrameColor::WHITE);
        assert_eq!(FrameColor::resolve(None, Some("none")), FrameColor::BLACK);
        assert_eq!(FrameColor::resolve(None, None), FrameColor::WHITE);
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(FrameColor::new([0x0a, 0xbc, 0xde]).to_string(), "#0ABCDE");
        assert_eq!(FrameColor::default().to_string(), "#FFFFFF");
    }
}
