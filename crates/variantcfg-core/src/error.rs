//! Error types for the variant configurator.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for build configuration resolution.
#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Malformed credential file {}: '{key}' {reason}", .path.display())]
    CredentialFileMalformed {
        path: PathBuf,
        key: &'static str,
        reason: &'static str,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency version conflict: {coordinate} declares its own version {version}")]
    DependencyVersionConflict { coordinate: String, version: String },

    #[error("Invalid dependency coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl VariantError {
    /// Name of the offending key when the credential file is malformed.
    pub fn malformed_key(&self) -> Option<&'static str> {
        match self {
            VariantError::CredentialFileMalformed { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Result type alias for configurator operations.
pub type Result<T> = std::result::Result<T, VariantError>;
