//! CLI error type and Kibana client wiring.

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use spacecopy_client::KibanaClient;
use spacecopy_config::{ClientSettings, ConfigError};
use spacecopy_resource::{CopyAdapter, ResourceError};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Document problems are for the user to fix; unreadable files are not.
    pub(crate) fn from_config(error: ConfigError) -> Self {
        if matches!(error, ConfigError::Io { .. }) {
            Self::failure(error)
        } else {
            Self::validation(format!("{:#}", anyhow::Error::new(error)))
        }
    }

    /// Kibana failures are operational; lifecycle misuse is a validation error.
    pub(crate) fn from_resource(error: ResourceError) -> Self {
        if matches!(error, ResourceError::Client(_)) {
            Self::failure(error)
        } else {
            Self::validation(error.to_string())
        }
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Build the copy adapter from connection flags, tagging requests with `request_id`.
pub(crate) fn build_adapter(cli: &Cli, request_id: &str) -> CliResult<CopyAdapter<KibanaClient>> {
    let settings = ClientSettings::new(
        &cli.kibana_url,
        cli.username.clone(),
        cli.password.clone(),
        cli.api_key.clone(),
        cli.timeout,
    )
    .map_err(CliError::from_config)?;

    let client = KibanaClient::new(&settings, Some(request_id))
        .map_err(|err| CliError::failure(anyhow!("failed to build Kibana client: {err}")))?;
    Ok(CopyAdapter::new(client))
}
