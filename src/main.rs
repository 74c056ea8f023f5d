//! tunnel-bootstrap
//!
//! Starts a local development environment reachable from the internet.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌───────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//!   │  process  │──▶│    tunnel    │──▶│  tunnel     │──▶│   env_file   │
//!   │  tools    │   │   launcher   │   │  discovery  │   │    upsert    │
//!   └───────────┘   └──────────────┘   └─────────────┘   └──────┬───────┘
//!                                                               │
//!                                                               ▼
//!   ┌───────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//!   │  summary  │◀──│ public health│◀──│ local health│◀──│   server     │
//!   │           │   │   (warn)     │   │   (warn)    │   │   launcher   │
//!   └───────────┘   └──────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! Every arrow is gated on the previous step. Tool detection, tunnel
//! discovery and file/process failures abort the run with a nonzero exit
//! status; health check failures are logged as warnings.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tunnel_bootstrap::config::{load_or_default, resolve_port, validate_config, ConfigError};
use tunnel_bootstrap::lifecycle::log_summary;
use tunnel_bootstrap::observability::logging;
use tunnel_bootstrap::{Bootstrap, BootstrapConfig, BootstrapError};

#[derive(Parser)]
#[command(name = "tunnel-bootstrap")]
#[command(about = "Start a tunnel, publish its URL and launch the app server", long_about = None)]
struct Cli {
    /// Config file (defaults to ./bootstrap.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Application port; takes precedence over PORT and the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Environment file receiving the public URL
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Key written to the environment file
    #[arg(short, long)]
    key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

/// Load config and apply overrides; returns deferred warnings to log once logging is up.
fn prepare_config(cli: &Cli) -> Result<(BootstrapConfig, Vec<String>), BootstrapError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    let mut warnings = Vec::new();

    match cli.port {
        Some(port) => config.app.port = port,
        None => {
            let raw = std::env::var("PORT").ok();
            let (port, warning) = resolve_port(raw.as_deref(), config.app.port);
            config.app.port = port;
            warnings.extend(warning);
        }
    }
    if let Some(path) = &cli.env_file {
        config.env_file.path = path.clone();
    }
    if let Some(key) = &cli.key {
        config.env_file.key = key.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok((config, warnings))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, warnings) = match prepare_config(&cli) {
        Ok(prepared) => prepared,
        Err(e) => {
            logging::init(&Default::default());
            tracing::error!(error = %e, "Configuration rejected");
            return ExitCode::from(e.exit_code());
        }
    };

    logging::init(&config.observability);
    tracing::info!("tunnel-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));
    for warning in warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        app_port = config.app.port,
        tunnel_api_port = config.tunnel.api_port,
        env_file = %config.env_file.path.display(),
        key = %config.env_file.key,
        "Configuration loaded"
    );

    let result = match Bootstrap::new(config) {
        Ok(bootstrap) => bootstrap.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            log_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Bootstrap failed");
            ExitCode::from(e.exit_code())
        }
    }
}
