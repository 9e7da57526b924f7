//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use spacecopy_resource::CopyAdapter;
use spacecopy_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use crate::client::{CliResult, build_adapter};
use crate::commands::{handle_apply, handle_destroy, handle_plan, handle_refresh, handle_show};
use crate::state::StateStore;

const DEFAULT_KIBANA_URL: &str = "http://localhost:5601";
const DEFAULT_CONFIG_PATH: &str = "spacecopy.yaml";
const DEFAULT_STATE_PATH: &str = "spacecopy.state.json";
/// Build identifier stamped on logs; set `SPACECOPY_BUILD_SHA` at compile time.
const BUILD_SHA: &str = match option_env!("SPACECOPY_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Parses CLI arguments, installs logging, and executes the requested command.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&logging_config(&cli)) {
        eprintln!("error: failed to initialise logging: {err}");
        return 3;
    }

    execute(cli).await
}

fn logging_config(cli: &Cli) -> LoggingConfig<'_> {
    LoggingConfig {
        level: &cli.log_level,
        format: cli
            .log_format
            .as_deref()
            .map_or_else(LogFormat::infer, LogFormat::from_name),
        build_sha: BUILD_SHA,
    }
}

/// Run one parsed invocation. Each run is tagged with a fresh request id.
pub(crate) async fn execute(cli: Cli) -> i32 {
    let command = cli.command.label();
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("spacecopy", command, request_id = %request_id);

    match dispatch(&cli, &request_id).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            error!(command, exit_code, error = %message, "command failed");
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn dispatch(cli: &Cli, request_id: &str) -> CliResult<()> {
    let store = StateStore::new(&cli.state);

    match cli.command {
        Command::Plan => handle_plan(&store, &cli.config, cli.output),
        Command::Show => handle_show(&store, cli.output),
        Command::Apply => {
            let adapter = build_adapter(cli, request_id)?;
            handle_apply(&adapter, &store, &cli.config, cli.output).await
        }
        Command::Refresh => handle_refresh(&CopyAdapter::local(), &store, cli.output),
        Command::Destroy => handle_destroy(&CopyAdapter::local(), &store, cli.output),
    }
}

#[derive(Parser)]
#[command(
    name = "spacecopy",
    about = "Copy Kibana saved objects between spaces and track the copy locally"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "SPACECOPY_CONFIG",
        default_value = DEFAULT_CONFIG_PATH,
        help = "Resource document (.json, .yaml or .yml)"
    )]
    pub(crate) config: PathBuf,
    #[arg(
        long,
        global = true,
        env = "SPACECOPY_STATE",
        default_value = DEFAULT_STATE_PATH,
        help = "JSON state file; a missing file means nothing is tracked"
    )]
    pub(crate) state: PathBuf,
    #[arg(long, global = true, env = "KIBANA_URL", default_value = DEFAULT_KIBANA_URL)]
    pub(crate) kibana_url: String,
    #[arg(long, global = true, env = "KIBANA_USERNAME")]
    pub(crate) username: Option<String>,
    #[arg(long, global = true, env = "KIBANA_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
    #[arg(long, global = true, env = "KIBANA_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
    #[arg(
        long,
        global = true,
        env = "KIBANA_TIMEOUT_SECS",
        help = "Request timeout in seconds (default 30)"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "SPACECOPY_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "SPACECOPY_LOG_FORMAT",
        help = "Log format: json or pretty"
    )]
    pub(crate) log_format: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
pub(crate) enum Command {
    /// Show what apply would do without contacting Kibana.
    Plan,
    /// Copy the declared objects when needed and save the tracked state.
    Apply,
    /// Normalize the tracked state and clear a pending force trigger.
    Refresh,
    /// Stop tracking the copy. Copied objects stay in Kibana.
    Destroy,
    /// Print the tracked state.
    Show,
}

impl Command {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Refresh => "refresh",
            Self::Destroy => "destroy",
            Self::Show => "show",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
