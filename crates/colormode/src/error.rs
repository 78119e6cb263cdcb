//! Error types for setting up color mode.
//!
//! Resolution itself never fails: a missing host capability degrades to the
//! configured fallback. Errors only arise while loading and validating
//! [`ColorModeOptions`](crate::ColorModeOptions).

use std::io;

/// Errors that can occur while loading or validating options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options document could not be parsed.
    #[error("Failed to parse {format} options: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// The options file could not be read.
    #[error("Failed to read options file: {0}")]
    Io(#[from] io::Error),

    /// The options file extension is not a known format.
    #[error("Unsupported options format '{0}' (expected yaml, yml or json)")]
    UnsupportedFormat(String),

    /// A field holds a value the resolver cannot work with.
    #[error("Invalid option '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// Create a validation error for `field`.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            format: "YAML",
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            format: "JSON",
            message: err.to_string(),
        }
    }
}
