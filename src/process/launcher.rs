//! Fire-and-forget process launching.
//!
//! The orchestrator never waits on a launched process. Readiness is observed
//! over HTTP instead; exit codes are not collected and nothing is restarted.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{BootstrapError, Result};

/// Placeholder substituted with the application port in argument lists.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Everything needed to start one background process.
#[derive(Debug, Clone, Default)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    /// File receiving stdout; discarded when `None`.
    pub stdout: Option<PathBuf>,
    /// File receiving stderr; discarded when `None`.
    pub stderr: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }
}

/// Handle to a launched process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedProcess {
    pub program: String,
    pub pid: Option<u32>,
}

/// Replace `{port}` in every argument.
pub fn substitute_port(args: &[String], port: u16) -> Vec<String> {
    args.iter()
        .map(|arg| arg.replace(PORT_PLACEHOLDER, &port.to_string()))
        .collect()
}

/// Start `spec` in the background and return immediately.
pub fn launch(spec: &LaunchSpec) -> Result<LaunchedProcess> {
    let to_launch_error = |source| BootstrapError::Launch {
        program: spec.program.clone(),
        source,
    };

    let (stdout, stderr) =
        outputs(spec.stdout.as_deref(), spec.stderr.as_deref()).map_err(to_launch_error)?;

    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .kill_on_drop(false);

    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(to_launch_error)?;
    let pid = child.id();

    tracing::info!(
        program = %spec.program,
        args = ?spec.args,
        pid = ?pid,
        "Process launched"
    );

    // Dropping the handle detaches the child; it keeps running.
    drop(child);

    Ok(LaunchedProcess {
        program: spec.program.clone(),
        pid,
    })
}

/// Stdio pair for the child. A path shared by both streams is opened once so
/// they write through one file offset.
fn outputs(stdout: Option<&Path>, stderr: Option<&Path>) -> std::io::Result<(Stdio, Stdio)> {
    match (stdout, stderr) {
        (Some(out), Some(err)) if out == err => {
            let file = create_log(out)?;
            let shared = file.try_clone()?;
            Ok((file.into(), shared.into()))
        }
        _ => Ok((output(stdout)?, output(stderr)?)),
    }
}

fn output(path: Option<&Path>) -> std::io::Result<Stdio> {
    match path {
        Some(path) => Ok(create_log(path)?.into()),
        None => Ok(Stdio::null()),
    }
}

fn create_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}
