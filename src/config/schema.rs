//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bootstrapper.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::retries::RetryPolicy;

/// Root configuration for a bootstrap run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Where the application server listens locally.
    pub app: AppConfig,

    /// Tunnel daemon settings.
    pub tunnel: TunnelConfig,

    /// Environment file receiving the public URL.
    pub env_file: EnvFileConfig,

    /// Application server launch settings.
    pub server: ServerConfig,

    /// Health check settings.
    pub health: HealthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Local application endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host used to reach the application locally.
    pub host: String,

    /// Port the application server listens on.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 7014,
        }
    }
}

/// Tunnel daemon configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TunnelConfig {
    /// Tunnel executable, resolved through PATH.
    pub binary: String,

    /// Arguments; `{port}` is replaced with the application port.
    pub args: Vec<String>,

    /// Host of the daemon's local control API.
    pub api_host: String,

    /// Fixed port of the daemon's local control API.
    pub api_port: u16,

    /// Optional file capturing the daemon's output.
    pub log_file: Option<PathBuf>,

    /// Retry budget for public URL discovery.
    pub discovery: RetrySettings,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            binary: "ngrok".to_string(),
            args: vec!["http".to_string(), "{port}".to_string()],
            api_host: "localhost".to_string(),
            api_port: 4040,
            log_file: None,
            discovery: RetrySettings {
                attempts: 30,
                delay_ms: 1000,
            },
        }
    }
}

/// Environment file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvFileConfig {
    /// Path of the `KEY=VALUE` file.
    pub path: PathBuf,

    /// Template copied when the file does not exist yet.
    pub template: Option<PathBuf>,

    /// Key that receives the public URL.
    pub key: String,

    /// Keys that must carry a real value for the application to work.
    pub required_keys: Vec<String>,

    /// Groups where at least one key must carry a real value.
    pub required_any: Vec<Vec<String>>,
}

impl Default for EnvFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".env"),
            template: Some(PathBuf::from(".env.example")),
            key: "BASE_URL".to_string(),
            required_keys: Vec::new(),
            required_any: Vec::new(),
        }
    }
}

/// Application server launch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server executable, resolved through PATH.
    pub program: String,

    /// Arguments; `{port}` is replaced with the application port.
    pub args: Vec<String>,

    /// Working directory of the server process.
    pub working_dir: PathBuf,

    /// File receiving the server's standard output.
    pub stdout_log: PathBuf,

    /// File receiving the server's standard error.
    pub stderr_log: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["-m".to_string(), "app".to_string()],
            working_dir: PathBuf::from("."),
            stdout_log: PathBuf::from("logs/server.out.log"),
            stderr_log: PathBuf::from("logs/server.err.log"),
        }
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Path probed on both the local and the public endpoint.
    pub path: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Route the public check through the environment's HTTP proxy settings.
    pub system_proxy: bool,

    /// Retry budget for the local endpoint.
    pub local: RetrySettings,

    /// Retry budget for the public endpoint.
    pub public: RetrySettings,
}

impl HealthConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            system_proxy: true,
            local: RetrySettings {
                attempts: 30,
                delay_ms: 1000,
            },
            public: RetrySettings {
                attempts: 10,
                delay_ms: 2000,
            },
        }
    }
}

/// Fixed retry budget: a number of attempts and the pause between them.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct RetrySettings {
    /// Maximum number of probe attempts.
    pub attempts: u32,

    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.attempts, Duration::from_millis(self.delay_ms))
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
