use thiserror::Error;

use crate::session::status;

/// Main error type for the picme library
#[derive(Error, Debug)]
pub enum BoothError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Usage logging error: {0}")]
    Usage(#[from] UsageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Capture source errors
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("No camera device available: {details}")]
    NoDevice { details: String },

    #[error("Camera is not ready: frame dimensions unknown")]
    NotReady,

    #[error("Camera stream ended")]
    StreamEnded,
}

/// Capture flow errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture requested before the camera was started")]
    NotStarted,

    #[error("A capture sequence is already in progress")]
    Busy,

    #[error("Frame is {actual_width}x{actual_height}, source advertised {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Layout composition errors
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Layout {layout} needs {expected} shots, got {actual}")]
    ShotCountMismatch {
        layout: String,
        expected: usize,
        actual: usize,
    },

    #[error("Shot {index} has an empty frame")]
    EmptyShot { index: usize },

    #[error("PNG encoding failed: {reason}")]
    EncodingFailed { reason: String },
}

/// Result export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Usage logging errors. These never reach the user.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Endpoint {endpoint} answered {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Transport failure posting to {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },
}

/// Convenience type alias for Results using BoothError
pub type Result<T> = std::result::Result<T, BoothError>;

impl BoothError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if the user can retry without reloading
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Access has to be granted again from outside the booth
            Self::Camera(CameraError::AccessDenied { .. }) => false,
            Self::Camera(CameraError::NoDevice { .. }) => false,
            Self::Config(_) => false,
            _ => true,
        }
    }

    /// Get the status line shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Camera(CameraError::AccessDenied { .. })
            | Self::Camera(CameraError::NoDevice { .. }) => status::CAMERA_DENIED.to_string(),
            Self::Capture(CaptureError::NotStarted) => status::NOT_STARTED.to_string(),
            Self::Capture(CaptureError::Busy) => status::BUSY.to_string(),
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            Self::Camera(_) | Self::Capture(_) | Self::Composition(_) => {
                status::CAPTURE_FAILED.to_string()
            }
            _ => self.to_string(),
        }
    }
}
