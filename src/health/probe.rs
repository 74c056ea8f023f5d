//! HTTP health probing.
//!
//! # Responsibilities
//! - Probe one health URL: success status and a JSON body
//! - Poll it under a fixed retry budget
//! - Report the outcome; never abort the run

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::resilience::retries::{poll_until_ready, RetryPolicy};

/// Why a single health probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("status {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not JSON: {0}")]
    Body(#[source] reqwest::Error),
}

/// Outcome of a health poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy { attempts: u32 },
    Unhealthy { attempts: u32, reason: String },
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            HealthStatus::Healthy { attempts } | HealthStatus::Unhealthy { attempts, .. } => {
                *attempts
            }
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy { attempts } => write!(f, "healthy after {attempts} attempt(s)"),
            HealthStatus::Unhealthy { attempts, reason } => {
                write!(f, "unhealthy after {attempts} attempt(s): {reason}")
            }
        }
    }
}

/// Join the health path onto a base URL, keeping any path the base has.
pub fn health_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
}

/// Probe `url` once.
pub async fn probe(client: &reqwest::Client, url: &Url) -> Result<serde_json::Value, ProbeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(ProbeError::Request)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProbeError::Status(status));
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(ProbeError::Body)
}

/// Poll `url` until healthy or the budget is spent.
pub async fn check(
    client: &reqwest::Client,
    url: &Url,
    policy: RetryPolicy,
    label: &str,
) -> HealthStatus {
    tracing::info!(endpoint = label, %url, attempts = policy.attempts, "Checking health");

    match poll_until_ready(policy, move |_| probe(client, url)).await {
        Ok(ready) => {
            tracing::info!(
                endpoint = label,
                attempts = ready.attempts,
                body = %ready.value,
                "Health check passed"
            );
            HealthStatus::Healthy {
                attempts: ready.attempts,
            }
        }
        Err(exhausted) => {
            let reason = exhausted
                .last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string());
            tracing::warn!(
                endpoint = label,
                %url,
                attempts = exhausted.attempts,
                reason = %reason,
                "Health check did not pass, continuing"
            );
            HealthStatus::Unhealthy {
                attempts: exhausted.attempts,
                reason,
            }
        }
    }
}
