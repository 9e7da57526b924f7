//! Error types for the copy adapter.

use spacecopy_client::ClientError;
use thiserror::Error;

/// Errors surfaced by lifecycle operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The copy call failed; the client error is passed through unchanged.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The operation needs a tracked resource but the state is absent.
    #[error("copy resource is not tracked")]
    NotTracked,
    /// The declared name differs from the tracked identifier.
    #[error("name is immutable: tracked '{tracked}', declared '{declared}'")]
    ImmutableName {
        /// Identifier currently tracked.
        tracked: String,
        /// Name found in the declaration.
        declared: String,
    },
}

/// Convenience alias for adapter results.
pub type ResourceResult<T> = Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_rendered_verbatim() {
        let client = ClientError::InvalidHeader {
            name: "x-request-id",
        };
        let expected = client.to_string();
        let err = ResourceError::from(client);
        assert_eq!(err.to_string(), expected);
    }
}
