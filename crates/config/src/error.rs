//! Error types for configuration loading.

use std::path::PathBuf;

use crate::validation::{ValidationError, ValidationErrors};

/// Errors that can occur while loading [`Settings`](crate::Settings).
///
/// Callers are expected to abort startup on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The environment variable naming the config file is unset or empty.
    #[error("config source not set: environment variable {var} is missing or empty")]
    MissingSource { var: String },

    /// The config file could not be read.
    #[error("unable to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not fit the settings schema.
    #[error("unable to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but failed semantic validation.
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),
}

impl ConfigError {
    /// Validation errors carried by this error, empty for read/parse failures.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConfigError::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
