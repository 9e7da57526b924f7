//! Error types for Kibana client operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to Kibana.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be joined with an API path.
    #[error("invalid Kibana URL for path '{path}'")]
    InvalidBaseUrl {
        /// API path that failed to join.
        path: String,
        /// Underlying URL error.
        source: url::ParseError,
    },
    /// A default header value contained characters HTTP does not allow.
    #[error("invalid value for header '{name}'")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },
    /// Building the HTTP client failed.
    #[error("failed to build HTTP client")]
    Build {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The request could not be sent or its response could not be read.
    #[error("request to Kibana failed during {operation}")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// Kibana answered with a non-success status.
    #[error("Kibana returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Response body as text.
        body: String,
    },
}

impl ClientError {
    /// HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;
