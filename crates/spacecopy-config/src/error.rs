//! Error types for resource declarations and connection settings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was not declared.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Schema name of the missing field.
        field: &'static str,
    },
    /// Field contained an invalid value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Schema name of the offending field (with element index when relevant).
        field: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// Two fields that exclude each other were both provided.
    #[error("'{first}' cannot be combined with '{second}'")]
    ConflictingFields {
        /// First field of the conflicting pair.
        first: &'static str,
        /// Second field of the conflicting pair.
        second: &'static str,
    },
    /// File extension did not map to a supported document format.
    #[error("unsupported document format for {path:?}")]
    UnsupportedFormat {
        /// Path of the rejected document.
        path: PathBuf,
    },
    /// A validation pattern failed to compile.
    #[error("failed to compile validation pattern")]
    PatternCompile {
        /// Pattern source.
        pattern: &'static str,
        /// Underlying regex error.
        source: regex::Error,
    },
    /// JSON document could not be decoded.
    #[error("invalid JSON resource document")]
    Json {
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// YAML document could not be decoded.
    #[error("invalid YAML resource document")]
    Yaml {
        /// Underlying serde error.
        source: serde_yaml::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason,
            value: None,
        }
    }

    pub(crate) fn invalid_value(
        field: impl Into<String>,
        reason: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason,
            value: Some(value.into()),
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
