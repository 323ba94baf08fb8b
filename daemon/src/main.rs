//! Linea Voyager daemon: HTTP functions server and local snap driver.

mod config;
mod local_host;

use anyhow::Context;
use clap::Parser;
use config::DaemonConfig;
use local_host::LocalHost;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use voyager_functions::{FunctionsServer, FunctionsState, Secrets};
use voyager_registration::{RegistrationClient, RegistrationService, SheetsLedger};
use voyager_snap::{PlainText, SnapHandler};
use voyager_store::JsonFileStore;
use voyager_types::ChainId;
use voyager_upstream::{Aggregator, HttpJson, HttpUpstream, JsonRpcChain};
use voyager_utils::{init_logging, Clock, LogFormat, SystemClock};

#[derive(Parser)]
#[command(name = "voyager-daemon", about = "Linea Voyager functions and snap driver")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VOYAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOYAGER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOYAGER_LOG_FORMAT")]
    log_format: Option<String>,

    #[arg(long, env = "CONTENTFUL_API_KEY", hide_env_values = true)]
    contentful_api_key: Option<String>,

    #[arg(long, env = "LINEASCAN_API_KEY", hide_env_values = true)]
    lineascan_api_key: Option<String>,

    #[arg(long, env = "TALLY_API_KEY", hide_env_values = true)]
    tally_api_key: Option<String>,

    /// Enables the keyed subgraph gateway for ENS lookups.
    #[arg(long, env = "THE_GRAPH_API_KEY", hide_env_values = true)]
    the_graph_api_key: Option<String>,

    #[arg(long, env = "SHEETS_SPREADSHEET_ID")]
    sheets_spreadsheet_id: Option<String>,

    #[arg(long, env = "SHEETS_ACCESS_TOKEN", hide_env_values = true)]
    sheets_access_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the HTTP functions.
    Serve {
        #[arg(long, env = "VOYAGER_BIND")]
        bind: Option<String>,

        #[arg(long, env = "VOYAGER_PORT")]
        port: Option<u16>,
    },
    /// Drive the snap against a terminal host and a JSON state file.
    Snap {
        #[arg(long, env = "VOYAGER_STATE_FILE")]
        state_file: Option<PathBuf>,

        #[arg(long, env = "VOYAGER_CHAIN_ID")]
        chain_id: Option<String>,

        #[arg(long, env = "VOYAGER_LOCALE")]
        locale: Option<String>,

        #[command(subcommand)]
        action: SnapAction,
    },
}

#[derive(clap::Subcommand)]
enum SnapAction {
    /// Run the install hook (captions, address prompt).
    Install,
    /// Run the update hook (caption reload).
    Update,
    /// Refresh and print the home page.
    Home,
    /// Call a remote-procedure method, e.g. `getLxpAddress`.
    Rpc {
        method: String,
        /// JSON params, e.g. '{"lxpAddress":"0x..."}'.
        #[arg(default_value = "null")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    init_logging(format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let keys = &mut config.upstream;
    keys.contentful_api_key = cli.contentful_api_key.or(keys.contentful_api_key.take());
    keys.lineascan_api_key = cli.lineascan_api_key.or(keys.lineascan_api_key.take());
    keys.tally_api_key = cli.tally_api_key.or(keys.tally_api_key.take());
    keys.the_graph_api_key = cli.the_graph_api_key.or(keys.the_graph_api_key.take());
    config.sheets_spreadsheet_id = cli
        .sheets_spreadsheet_id
        .or(config.sheets_spreadsheet_id.take());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let upstream = Arc::new(HttpUpstream::new(config.upstream.clone(), clock.clone())?);

    match cli.command {
        Command::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let registration = match (&config.sheets_spreadsheet_id, &cli.sheets_access_token) {
                (Some(id), Some(token)) => {
                    let ledger = SheetsLedger::new(id.clone(), token.clone())?;
                    Some(Arc::new(RegistrationService::new(Arc::new(ledger), clock.clone())))
                }
                _ => {
                    tracing::warn!("spreadsheet credentials not set, registration will answer 500");
                    None
                }
            };
            let secrets = Secrets::from(upstream.config());
            let state = FunctionsState::new(secrets, upstream, clock, registration)?;

            let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
                .parse()
                .with_context(|| format!("invalid bind address {}:{}", config.bind, config.port))?;
            FunctionsServer::new(addr).serve(state).await?;
            tracing::info!("Voyager daemon exited cleanly");
        }
        Command::Snap {
            state_file,
            chain_id,
            locale,
            action,
        } => {
            if let Some(path) = state_file {
                config.state_file = path;
            }
            if let Some(chain_id) = chain_id {
                config.chain_id = chain_id;
            }
            if let Some(locale) = locale {
                config.locale = locale;
            }

            let chain = JsonRpcChain::new(
                HttpJson::new(Duration::from_secs(config.upstream.timeout_secs))?,
                config.chain_rpc_url.clone(),
            );
            let host = Arc::new(LocalHost::new(
                ChainId::new(config.chain_id.clone()),
                config.locale.clone(),
                chain,
            ));
            let store = Arc::new(JsonFileStore::new(config.state_file.clone()));
            let aggregator = Aggregator::new(upstream, clock);
            let mut handler = SnapHandler::new(host, store, aggregator);
            if let Some(url) = &config.registration_url {
                let client = RegistrationClient::new(
                    url.clone(),
                    Duration::from_secs(config.upstream.timeout_secs),
                )?;
                handler = handler.with_registrar(Arc::new(client));
            }

            match action {
                SnapAction::Install => handler.on_install().await?,
                SnapAction::Update => handler.on_update().await?,
                SnapAction::Home => {
                    let page = handler.on_home_page().await?;
                    println!("{}", PlainText::render(&page));
                }
                SnapAction::Rpc { method, params } => {
                    let params: serde_json::Value =
                        serde_json::from_str(&params).context("params must be JSON")?;
                    let result = handler.on_rpc_request(&method, params).await?;
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
            }
        }
    }

    Ok(())
}
