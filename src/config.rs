use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    capture::CaptureConstraints,
    error::{ConfigError, Result},
};

/// Main configuration for the photobooth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Countdown pacing
    pub countdown: CountdownConfig,

    /// Frame capture settings
    pub capture: CaptureConfig,

    /// Layout composition settings
    pub composition: CompositionConfig,

    /// Usage logging endpoint
    pub usage: UsageConfig,

    /// Download settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.countdown.validate()?;
        self.composition.validate()?;
        self.usage.validate()?;
        Ok(())
    }
}

/// Countdown shown before every shot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Number shown first
    pub seconds: u32,

    /// Time between decrements (milliseconds)
    pub tick_ms: u64,

    /// How long "Smile!" stays up before the shot (milliseconds)
    pub smile_hold_ms: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            seconds: 3,
            tick_ms: 1000,
            smile_hold_ms: 350,
        }
    }
}

impl CountdownConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.seconds) {
            return Err(ConfigError::InvalidValue {
                key: "countdown.seconds".to_string(),
                value: self.seconds.to_string()
            }.into());
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "countdown.tick_ms".to_string(),
                value: self.tick_ms.to_string()
            }.into());
        }

        if self.smile_hold_ms > 5000 {
            return Err(ConfigError::InvalidValue {
                key: "countdown.smile_hold_ms".to_string(),
                value: self.smile_hold_ms.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Frame capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Flip saved shots horizontally to match the mirrored preview
    pub mirror_output: bool,

    /// Constraints passed to the capture source on start
    #[serde(flatten)]
    pub constraints: CaptureConstraints,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mirror_output: true,
            constraints: CaptureConstraints::default(),
        }
    }
}

/// Layout composition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Largest cell edge for the 3-shot strip (pixels)
    pub strip_cell_max: u32,

    /// Largest cell edge for the 2x2 grid (pixels)
    pub grid_cell_max: u32,

    /// Opacity of the white outline drawn around each photo (0.0-1.0)
    pub outline_alpha: f32,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            strip_cell_max: 720,
            grid_cell_max: 620,
            outline_alpha: 0.35,
        }
    }
}

impl CompositionConfig {
    fn validate(&self) -> Result<()> {
        if self.strip_cell_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "composition.strip_cell_max".to_string(),
                value: self.strip_cell_max.to_string()
            }.into());
        }

        if self.grid_cell_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "composition.grid_cell_max".to_string(),
                value: self.grid_cell_max.to_string()
            }.into());
        }

        if !(0.0..=1.0).contains(&self.outline_alpha) {
            return Err(ConfigError::InvalidValue {
                key: "composition.outline_alpha".to_string(),
                value: self.outline_alpha.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Usage logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Send a usage event after every composed capture
    pub enabled: bool,

    /// Full URL of the log-event endpoint
    pub endpoint: String,

    /// Request timeout (milliseconds)
    pub timeout_ms: u64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://127.0.0.1:8080/api/log-event".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl UsageConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled && !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "usage.endpoint".to_string(),
                value: self.endpoint.clone()
            }.into());
        }

        Ok(())
    }
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory downloads are written into
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}
