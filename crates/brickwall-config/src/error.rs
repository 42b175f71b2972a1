//! Error types for configuration operations.

use std::path::PathBuf;

use brickwall_core::LimiterError;
use thiserror::Error;

/// Errors that can occur while loading or applying a limiter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value could not be read in the units its option expects
    #[error("invalid value '{value}' for '{param}': {reason}")]
    InvalidParameter {
        /// Name of the option.
        param: String,
        /// The value as written.
        value: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// The values parsed but the limiter rejected them
    #[error("invalid limiter configuration: {0}")]
    Limiter(#[from] LimiterError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(
        param: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidParameter {
            param: param.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
