//! Unified error types for the appspec workspace.
//!
//! Covers everything around population: reading application files,
//! parsing them, validating them, and serializing manifests. Population
//! failures themselves live in `appspec-populate`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum AppSpecError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An application description is invalid.
    #[error("invalid application: {message}")]
    Config {
        /// Description of the invalid declaration.
        message: String,
    },

    /// A YAML document could not be parsed or emitted.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl AppSpecError {
    /// Builds a [`AppSpecError::Config`] from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, AppSpecError>;
