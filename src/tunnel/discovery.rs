//! Public URL discovery through the tunnel daemon's control API.
//!
//! # Responsibilities
//! - Query `GET /api/tunnels` on the local control port
//! - Select the first tunnel speaking HTTPS
//! - Retry under a fixed budget until one appears

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::error::{BootstrapError, Result};
use crate::resilience::retries::{poll_until_ready, RetryPolicy};

/// Body of `GET /api/tunnels`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TunnelList {
    #[serde(default)]
    pub tunnels: Vec<Tunnel>,
}

/// One tunnel entry as reported by the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct Tunnel {
    #[serde(default)]
    pub name: String,
    pub proto: String,
    pub public_url: String,
}

/// Why a single discovery probe failed.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("control API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no https tunnel among {0} reported")]
    NoHttpsTunnel(usize),

    #[error("invalid public URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// First tunnel whose protocol is `https`.
pub fn select_https(list: &TunnelList) -> Option<&Tunnel> {
    list.tunnels.iter().find(|t| t.proto == "https")
}

/// Client for the daemon's local control API.
#[derive(Debug, Clone)]
pub struct TunnelApi {
    http: reqwest::Client,
    tunnels_url: String,
}

impl TunnelApi {
    pub fn new(http: reqwest::Client, host: &str, port: u16) -> Self {
        Self {
            http,
            tunnels_url: format!("http://{host}:{port}/api/tunnels"),
        }
    }

    pub fn tunnels_url(&self) -> &str {
        &self.tunnels_url
    }

    /// Fetch the current tunnel list.
    pub async fn list(&self) -> std::result::Result<TunnelList, DiscoveryError> {
        let list = self
            .http
            .get(&self.tunnels_url)
            .send()
            .await?
            .error_for_status()?
            .json::<TunnelList>()
            .await?;
        Ok(list)
    }

    /// One discovery probe: the HTTPS public URL if the daemon reports one.
    pub async fn public_url(&self) -> std::result::Result<Url, DiscoveryError> {
        let list = self.list().await?;
        let tunnel = select_https(&list).ok_or(DiscoveryError::NoHttpsTunnel(list.tunnels.len()))?;

        Url::parse(&tunnel.public_url).map_err(|source| DiscoveryError::InvalidUrl {
            url: tunnel.public_url.clone(),
            source,
        })
    }

    /// Poll until an HTTPS public URL appears; exhaustion is fatal.
    pub async fn discover(&self, policy: RetryPolicy) -> Result<Url> {
        tracing::info!(
            api = %self.tunnels_url,
            attempts = policy.attempts,
            "Waiting for tunnel public URL"
        );

        match poll_until_ready(policy, move |_| self.public_url()).await {
            Ok(ready) => {
                tracing::info!(
                    public_url = %ready.value,
                    attempts = ready.attempts,
                    "Tunnel public URL discovered"
                );
                Ok(ready.value)
            }
            Err(exhausted) => Err(BootstrapError::TunnelNotDiscovered {
                attempts: exhausted.attempts,
                last_error: exhausted
                    .last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no attempts made".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_https_over_http() {
        let list: TunnelList = serde_json::from_str(
            r#"{
                "tunnels": [
                    {"name": "command_line (http)", "proto": "http", "public_url": "http://abc.ngrok.io", "config": {"addr": "http://localhost:7014"}},
                    {"name": "command_line", "proto": "https", "public_url": "https://abc.ngrok.io"}
                ],
                "uri": "/api/tunnels"
            }"#,
        )
        .unwrap();

        let tunnel = select_https(&list).unwrap();
        assert_eq!(tunnel.public_url, "https://abc.ngrok.io");
        assert_eq!(tunnel.name, "command_line");
    }

    #[test]
    fn test_select_https_none() {
        let list: TunnelList = serde_json::from_str(
            r#"{"tunnels": [{"proto": "http", "public_url": "http://abc.ngrok.io"}]}"#,
        )
        .unwrap();
        assert!(select_https(&list).is_none());

        let empty: TunnelList = serde_json::from_str("{}").unwrap();
        assert!(select_https(&empty).is_none());
    }

    #[test]
    fn test_tunnels_url() {
        let api = TunnelApi::new(reqwest::Client::new(), "localhost", 4040);
        assert_eq!(api.tunnels_url(), "http://localhost:4040/api/tunnels");
    }
}
