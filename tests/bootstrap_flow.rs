//! End-to-end bootstrap runs against mock tunnel and health endpoints.

use std::fs;

use tunnel_bootstrap::config::RetrySettings;
use tunnel_bootstrap::env_file::UpsertOutcome;
use tunnel_bootstrap::health::HealthStatus;
use tunnel_bootstrap::tunnel::TunnelState;
use tunnel_bootstrap::{Bootstrap, BootstrapConfig, BootstrapError};

mod common;

fn fast(attempts: u32) -> RetrySettings {
    RetrySettings {
        attempts,
        delay_ms: 50,
    }
}

fn base_config(dir: &std::path::Path) -> BootstrapConfig {
    let mut config = BootstrapConfig::default();
    config.app.host = "127.0.0.1".into();
    config.tunnel.binary = "sh".into();
    config.tunnel.api_host = "127.0.0.1".into();
    config.tunnel.discovery = fast(5);
    config.env_file.path = dir.join(".env");
    config.env_file.template = Some(dir.join(".env.example"));
    config.server.program = "sh".into();
    config.server.args = vec!["-c".into(), "echo serving on {port}".into()];
    config.server.working_dir = dir.to_path_buf();
    config.server.stdout_log = dir.join("logs").join("server.out.log");
    config.server.stderr_log = dir.join("logs").join("server.err.log");
    config.health.local = fast(5);
    config.health.public = fast(3);
    config.health.system_proxy = false;
    config
}

#[tokio::test]
async fn test_full_run_publishes_url_and_checks_health() {
    let dir = tempfile::tempdir().unwrap();

    let app = common::start_json_backend(200, r#"{"status":"ok"}"#.into()).await;
    let public_url = format!("http://{app}");
    let tunnel_api =
        common::start_json_backend(200, common::tunnels_body("http://ignored.ngrok.io", &public_url))
            .await;

    fs::write(
        dir.path().join(".env.example"),
        "# copy me\nOPENAI_API_KEY=your_openai_key\nGLADIA_API_KEY=gl-123\nBASE_URL=\n",
    )
    .unwrap();

    let mut config = base_config(dir.path());
    config.app.port = app.port();
    config.tunnel.api_port = tunnel_api.port();
    config.env_file.required_keys = vec!["OPENAI_API_KEY".into()];
    config.env_file.required_any = vec![
        vec!["DEEPGRAM_API_KEY".into(), "GLADIA_API_KEY".into()],
        vec!["CARTESIA_API_KEY".into(), "ELEVENLABS_API_KEY".into()],
    ];

    let report = Bootstrap::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.tunnel, TunnelState::AlreadyRunning);
    assert_eq!(report.public_url.as_str(), format!("{public_url}/"));
    assert_eq!(report.env_update, UpsertOutcome::Replaced);
    assert_eq!(report.missing_env_keys, vec!["OPENAI_API_KEY"]);
    assert_eq!(
        report.missing_env_groups,
        vec![vec!["CARTESIA_API_KEY".to_string(), "ELEVENLABS_API_KEY".to_string()]]
    );
    assert!(report.server.pid.is_some());
    assert_eq!(report.local_health, HealthStatus::Healthy { attempts: 1 });
    assert_eq!(report.public_health, HealthStatus::Healthy { attempts: 1 });

    assert_eq!(
        fs::read_to_string(dir.path().join(".env")).unwrap(),
        format!("# copy me\nOPENAI_API_KEY=your_openai_key\nGLADIA_API_KEY=gl-123\nBASE_URL={public_url}\n")
    );
}

#[tokio::test]
async fn test_unhealthy_public_endpoint_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let app = common::start_json_backend(200, r#"{"status":"ok"}"#.into()).await;
    let gateway = common::start_json_backend(502, "bad gateway".into()).await;
    let tunnel_api = common::start_json_backend(
        200,
        common::tunnels_body("http://ignored.ngrok.io", &format!("http://{gateway}")),
    )
    .await;

    let mut config = base_config(dir.path());
    config.app.port = app.port();
    config.tunnel.api_port = tunnel_api.port();

    let bootstrap = Bootstrap::new(config).unwrap();
    let first = bootstrap.run().await.unwrap();
    assert!(first.local_health.is_healthy());
    assert!(matches!(
        first.public_health,
        HealthStatus::Unhealthy { attempts: 3, .. }
    ));
    assert_eq!(first.env_update, UpsertOutcome::Appended);

    // A second run with the same URL leaves the file alone.
    let second = bootstrap.run().await.unwrap();
    assert_eq!(second.env_update, UpsertOutcome::Unchanged);
}

#[tokio::test]
async fn test_missing_tool_aborts_before_launch() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = base_config(dir.path());
    config.tunnel.binary = "tunnel-bootstrap-no-such-tunnel".into();

    let err = Bootstrap::new(config).unwrap().run().await.unwrap_err();

    assert!(matches!(err, BootstrapError::MissingTool { ref tool } if tool == "tunnel-bootstrap-no-such-tunnel"));
    assert_eq!(err.exit_code(), 127);
    assert!(!dir.path().join(".env").exists());
    assert!(!dir.path().join("logs").exists());
}
