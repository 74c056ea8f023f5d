//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports valid, retry budgets non-empty)
//! - Detect conflicting ports
//! - Resolve the `PORT` environment override
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootstrapConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{BootstrapConfig, RetrySettings};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be between 1 and 65535")]
    InvalidPort { field: &'static str },

    #[error("app.port and tunnel.api_port must differ (both {0})")]
    PortConflict(u16),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field}.attempts must be at least 1")]
    NoAttempts { field: &'static str },

    #[error("env_file.key {0:?} must not contain '=' or whitespace")]
    InvalidKey(String),

    #[error("health.path {0:?} must start with '/'")]
    InvalidHealthPath(String),

    #[error("health.request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BootstrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.app.port == 0 {
        errors.push(ValidationError::InvalidPort { field: "app.port" });
    }
    if config.tunnel.api_port == 0 {
        errors.push(ValidationError::InvalidPort {
            field: "tunnel.api_port",
        });
    }
    if config.app.port != 0 && config.app.port == config.tunnel.api_port {
        errors.push(ValidationError::PortConflict(config.app.port));
    }

    for (field, value) in [
        ("app.host", &config.app.host),
        ("tunnel.binary", &config.tunnel.binary),
        ("tunnel.api_host", &config.tunnel.api_host),
        ("server.program", &config.server.program),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    let key = &config.env_file.key;
    if key.is_empty() {
        errors.push(ValidationError::Empty {
            field: "env_file.key",
        });
    } else if key.contains('=') || key.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidKey(key.clone()));
    }

    if !config.health.path.starts_with('/') {
        errors.push(ValidationError::InvalidHealthPath(config.health.path.clone()));
    }
    if config.health.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    check_budget(&mut errors, "tunnel.discovery", &config.tunnel.discovery);
    check_budget(&mut errors, "health.local", &config.health.local);
    check_budget(&mut errors, "health.public", &config.health.public);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_budget(errors: &mut Vec<ValidationError>, field: &'static str, settings: &RetrySettings) {
    if settings.attempts == 0 {
        errors.push(ValidationError::NoAttempts { field });
    }
}

/// Resolve the application port from an optional raw override.
///
/// Returns the port to use plus a warning when the override was rejected.
pub fn resolve_port(raw: Option<&str>, fallback: u16) -> (u16, Option<String>) {
    let Some(raw) = raw else {
        return (fallback, None);
    };

    match raw.trim().parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => (port as u16, None),
        Ok(port) => (
            fallback,
            Some(format!(
                "PORT {port} out of range (1-65535), using {fallback}"
            )),
        ),
        Err(_) => (
            fallback,
            Some(format!("Invalid PORT value '{raw}', using {fallback}")),
        ),
    }
}
