//! Tunnel daemon startup.

use std::time::Duration;

use tokio::net::TcpStream;

use crate::config::TunnelConfig;
use crate::error::Result;
use crate::process::launcher::{launch, substitute_port, LaunchSpec};

/// How the tunnel daemon came to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelState {
    /// Something was already listening on the control port.
    AlreadyRunning,
    /// The daemon was started by this run.
    Launched { pid: Option<u32> },
}

/// Whether anything accepts connections on the control port.
pub async fn is_listening(host: &str, port: u16, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect((host, port))).await,
        Ok(Ok(_))
    )
}

/// Start the tunnel daemon unless its control port is already open.
pub async fn ensure_running(
    config: &TunnelConfig,
    app_port: u16,
    connect_timeout: Duration,
) -> Result<TunnelState> {
    if is_listening(&config.api_host, config.api_port, connect_timeout).await {
        tracing::info!(
            api_port = config.api_port,
            "Tunnel daemon already running, reusing it"
        );
        return Ok(TunnelState::AlreadyRunning);
    }

    let spec = LaunchSpec {
        args: substitute_port(&config.args, app_port),
        stdout: config.log_file.clone(),
        stderr: config.log_file.clone(),
        ..LaunchSpec::new(&config.binary)
    };

    tracing::info!(binary = %config.binary, app_port, "Starting tunnel daemon");
    let launched = launch(&spec)?;

    Ok(TunnelState::Launched { pid: launched.pid })
}
