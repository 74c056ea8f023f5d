//! Startup summary.

use crate::lifecycle::startup::BootstrapReport;
use crate::tunnel::TunnelState;

/// One-line description of the tunnel state.
pub fn describe_tunnel(state: &TunnelState) -> String {
    match state {
        TunnelState::AlreadyRunning => "reused running daemon".to_string(),
        TunnelState::Launched { pid: Some(pid) } => format!("launched (pid {pid})"),
        TunnelState::Launched { pid: None } => "launched".to_string(),
    }
}

/// `one of A, B; one of C, D` for unsatisfied key groups.
pub fn describe_groups(groups: &[Vec<String>]) -> String {
    groups
        .iter()
        .map(|group| format!("one of {}", group.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Log the outcome of a run as a single block.
pub fn log_summary(report: &BootstrapReport) {
    let server_pid = report
        .server
        .pid
        .map(|pid| pid.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let missing_keys = if report.missing_env_keys.is_empty() {
        "none".to_string()
    } else {
        report.missing_env_keys.join(", ")
    };
    let missing_groups = if report.missing_env_groups.is_empty() {
        "none".to_string()
    } else {
        describe_groups(&report.missing_env_groups)
    };

    tracing::info!("==================================================");
    tracing::info!("Development environment ready");
    tracing::info!("==================================================");
    tracing::info!("Port: {}", report.app_port);
    tracing::info!("Tunnel: {}", describe_tunnel(&report.tunnel));
    tracing::info!("Public URL: {}", report.public_url);
    tracing::info!("Env file: {:?}", report.env_update);
    tracing::info!("Missing env keys: {}", missing_keys);
    tracing::info!("Missing env key groups: {}", missing_groups);
    tracing::info!("Server: {} (pid {})", report.server.program, server_pid);
    tracing::info!("Local health: {}", report.local_health);
    tracing::info!("Public health: {}", report.public_health);
    tracing::info!("==================================================");
}
