//! Fatal error types for a bootstrap run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a bootstrap run.
///
/// Health check failures are not represented here: they are reported as
/// warnings and the run continues.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A required executable could not be found on PATH.
    #[error("Required tool '{tool}' not found on PATH")]
    MissingTool { tool: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tunnel public URL not discovered after {attempts} attempts: {last_error}")]
    TunnelNotDiscovered { attempts: u32, last_error: String },

    #[error("Environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BootstrapError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BootstrapError::Config(_) => 2,
            BootstrapError::MissingTool { .. } => 127,
            _ => 1,
        }
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, BootstrapError>;
