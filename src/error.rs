//! Construction-time errors
//!
//! Everything that runs per tick is infallible; bad input is rejected when
//! a shell, settings file or layer lookup is built.

use std::fmt;

/// Error raised while validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The arc is too small (or not finite) to hold a single wave step
    DegenerateArc { arc_length: f32, min_step_length: f32 },
    /// End angle must be greater than start angle
    InvalidAngleRange { start: f32, end: f32 },
    /// A numeric parameter is out of range
    InvalidParameter { name: &'static str, value: f32 },
    /// Settings JSON could not be parsed or written
    Json(serde_json::Error),
    /// A render layer name that does not exist
    UnknownLayer(String),
    /// Settings file could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DegenerateArc {
                arc_length,
                min_step_length,
            } => write!(
                f,
                "arc length {arc_length} is too short for step length {min_step_length}"
            ),
            ConfigError::InvalidAngleRange { start, end } => {
                write!(f, "end angle {end} must be greater than start angle {start}")
            }
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for {name}")
            }
            ConfigError::Json(e) => write!(f, "settings json: {e}"),
            ConfigError::UnknownLayer(name) => write!(f, "unknown layer: {name}"),
            ConfigError::Io { path, source } => write!(f, "reading {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Reject non-finite or non-positive values
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

/// Reject non-finite or negative values
pub(crate) fn require_non_negative(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
