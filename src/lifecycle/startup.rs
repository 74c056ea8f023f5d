//! Ordered bootstrap sequence.

use std::fs;

use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::config::BootstrapConfig;
use crate::env_file::{missing_groups, missing_keys, upsert_file, UpsertOutcome};
use crate::error::{BootstrapError, Result};
use crate::health::{check, health_url, HealthStatus};
use crate::process::{launch, require_tools, substitute_port, LaunchSpec, LaunchedProcess};
use crate::resilience::timeouts::{local_client, public_client};
use crate::tunnel::{ensure_running, TunnelApi, TunnelState};

/// Everything a completed run observed.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub app_port: u16,
    pub tunnel: TunnelState,
    pub public_url: Url,
    pub env_update: UpsertOutcome,
    /// Required env keys still unset after the update.
    pub missing_env_keys: Vec<String>,
    /// Required key groups with no key set.
    pub missing_env_groups: Vec<Vec<String>>,
    pub server: LaunchedProcess,
    pub local_health: HealthStatus,
    pub public_health: HealthStatus,
}

/// Drives one bootstrap run from a validated configuration.
pub struct Bootstrap {
    config: BootstrapConfig,
    local: reqwest::Client,
    public: reqwest::Client,
}

impl Bootstrap {
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        let request = config.health.request_timeout();
        let connect = config.health.connect_timeout();

        Ok(Self {
            local: local_client(request, connect)?,
            public: public_client(request, connect, config.health.system_proxy)?,
            config,
        })
    }

    /// Run every step in order.
    ///
    /// Returns an error only for fatal steps; health failures are part of the report.
    pub async fn run(&self) -> Result<BootstrapReport> {
        let span = tracing::info_span!("bootstrap", run_id = %Uuid::new_v4());
        self.run_steps().instrument(span).await
    }

    async fn run_steps(&self) -> Result<BootstrapReport> {
        let config = &self.config;
        let app_port = config.app.port;

        require_tools([config.tunnel.binary.as_str(), config.server.program.as_str()])?;

        let tunnel = ensure_running(&config.tunnel, app_port, config.health.connect_timeout()).await?;

        let api = TunnelApi::new(self.local.clone(), &config.tunnel.api_host, config.tunnel.api_port);
        let public_url = api.discover(config.tunnel.discovery.policy()).await?;

        let (env_update, missing_env_keys, missing_env_groups) = self.update_env_file(&public_url)?;

        let server = self.launch_server()?;

        let local_health = match self.local_health_url() {
            Ok(url) => check(&self.local, &url, config.health.local.policy(), "local").await,
            Err(e) => unchecked("local", e),
        };

        let public_health = match health_url(&public_url, &config.health.path) {
            Ok(url) => check(&self.public, &url, config.health.public.policy(), "public").await,
            Err(e) => unchecked("public", e),
        };

        Ok(BootstrapReport {
            app_port,
            tunnel,
            public_url,
            env_update,
            missing_env_keys,
            missing_env_groups,
            server,
            local_health,
            public_health,
        })
    }

    fn update_env_file(
        &self,
        public_url: &Url,
    ) -> Result<(UpsertOutcome, Vec<String>, Vec<Vec<String>>)> {
        let env = &self.config.env_file;
        let to_env_error = |source| BootstrapError::EnvFile {
            path: env.path.clone(),
            source,
        };
        let value = public_url.as_str().trim_end_matches('/');

        let outcome = upsert_file(&env.path, env.template.as_deref(), &env.key, value)
            .map_err(to_env_error)?;
        tracing::info!(
            path = %env.path.display(),
            key = %env.key,
            outcome = ?outcome,
            "Environment file updated"
        );

        if env.required_keys.is_empty() && env.required_any.is_empty() {
            return Ok((outcome, Vec::new(), Vec::new()));
        }

        let content = fs::read_to_string(&env.path).map_err(to_env_error)?;
        let missing = missing_keys(&content, &env.required_keys);
        if !missing.is_empty() {
            tracing::warn!(
                path = %env.path.display(),
                keys = ?missing,
                "Required environment keys are missing or still placeholders"
            );
        }
        let missing_any = missing_groups(&content, &env.required_any);
        for group in &missing_any {
            tracing::warn!(
                path = %env.path.display(),
                keys = ?group,
                "None of these environment keys is set, at least one is required"
            );
        }

        Ok((outcome, missing, missing_any))
    }

    fn launch_server(&self) -> Result<LaunchedProcess> {
        let server = &self.config.server;
        let spec = LaunchSpec {
            args: substitute_port(&server.args, self.config.app.port),
            working_dir: Some(server.working_dir.clone()),
            env: vec![("PORT".to_string(), self.config.app.port.to_string())],
            stdout: Some(server.stdout_log.clone()),
            stderr: Some(server.stderr_log.clone()),
            ..LaunchSpec::new(&server.program)
        };

        tracing::info!(
            program = %server.program,
            stdout_log = %server.stdout_log.display(),
            stderr_log = %server.stderr_log.display(),
            "Starting application server"
        );
        launch(&spec)
    }

    fn local_health_url(&self) -> std::result::Result<Url, url::ParseError> {
        let app = &self.config.app;
        Url::parse(&format!("http://{}:{}{}", app.host, app.port, self.config.health.path))
    }
}

fn unchecked(label: &str, error: url::ParseError) -> HealthStatus {
    tracing::warn!(endpoint = label, error = %error, "Health URL invalid, skipping check");
    HealthStatus::Unhealthy {
        attempts: 0,
        reason: format!("invalid health URL: {error}"),
    }
}
