use std::fmt;

use serde::{Deserialize, Serialize};

/// How the captured shots are arranged in the final image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Single,
    Strip,
    Grid2x2,
}

/// Shape of the live preview crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAspect {
    FourByThree,
    Square,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Self::Single, Self::Strip, Self::Grid2x2];

    /// Parse a layout value by substring, so "photo-strip" or "Grid 2×2" work.
    /// Anything unrecognised is a single photo.
    pub fn parse(value: &str) -> Self {
        let v = value.to_lowercase();
        if v.contains("strip") {
            Self::Strip
        } else if v.contains("grid") || v.contains("2x2") || v.contains("2×2") {
            Self::Grid2x2
        } else {
            Self::Single
        }
    }

    /// Shots that must be captured before composing
    pub fn shot_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Strip => 3,
            Self::Grid2x2 => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Strip => "strip",
            Self::Grid2x2 => "grid2x2",
        }
    }

    /// Short kind used in download file names
    pub fn file_kind(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Strip => "strip",
            Self::Grid2x2 => "grid",
        }
    }

    pub fn download_filename(&self) -> String {
        format!("picme_{}.png", self.file_kind())
    }

    /// Multi-shot layouts compose square cells, so the preview is cropped square
    pub fn preview_aspect(&self) -> PreviewAspect {
        if self.shot_count() > 1 {
            PreviewAspect::Square
        } else {
            PreviewAspect::FourByThree
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
