//! Connection settings for the Kibana client.

use std::time::Duration;

use url::Url;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Unauthenticated access (security disabled on the cluster).
    Anonymous,
    /// HTTP basic authentication.
    Basic {
        /// Kibana user name.
        username: String,
        /// Kibana password.
        password: String,
    },
    /// Encoded API key sent as `Authorization: ApiKey <key>`.
    ApiKey(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => formatter.write_str("Anonymous"),
            Self::Basic { username, .. } => formatter
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey(_) => formatter.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// Validated settings used to build the Kibana client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Kibana base URL (scheme, host, optional base path).
    pub base_url: Url,
    /// Credentials attached to each request.
    pub credentials: Credentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientSettings {
    /// Build settings from loosely typed inputs (flags or environment).
    ///
    /// Empty strings count as absent. A username requires a password, and
    /// basic credentials cannot be combined with an API key.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or is not HTTP(S), when
    /// credentials are incomplete or conflicting, or when the timeout is zero.
    pub fn new(
        url: &str,
        username: Option<String>,
        password: Option<String>,
        api_key: Option<String>,
        timeout_secs: Option<u64>,
    ) -> ConfigResult<Self> {
        let base_url = parse_base_url(url)?;
        let username = username.filter(|value| !value.is_empty());
        let password = password.filter(|value| !value.is_empty());
        let api_key = api_key.filter(|value| !value.is_empty());

        let credentials = match (username, password, api_key) {
            (None, None, None) => Credentials::Anonymous,
            (None, None, Some(key)) => Credentials::ApiKey(key),
            (Some(username), Some(password), None) => Credentials::Basic { username, password },
            (Some(_), None, _) => {
                return Err(ConfigError::invalid("password", "is required with username"));
            }
            (None, Some(_), _) => {
                return Err(ConfigError::invalid("username", "is required with password"));
            }
            (Some(_), Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingFields {
                    first: "username",
                    second: "api_key",
                });
            }
        };

        let timeout_secs = timeout_secs.unwrap_or(defaults::CLIENT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "timeout",
                "must be greater than zero",
                "0",
            ));
        }

        Ok(Self {
            base_url,
            credentials,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_base_url(input: &str) -> ConfigResult<Url> {
    let url = Url::parse(input.trim())
        .map_err(|_| ConfigError::invalid_value("url", "must be an absolute URL", input))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_value(
            "url",
            "must use http or https",
            input,
        ));
    }
    Ok(url)
}
