//! External process subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     tools.rs (every required executable resolves on PATH, else fatal)
//!     → launcher.rs (spawn tunnel daemon / application server, detached)
//! ```
//!
//! # Design Decisions
//! - A single launch per process; no supervision, no restart
//! - Output goes to log files or is discarded, never to the orchestrator's terminal

pub mod launcher;
pub mod tools;

pub use launcher::{launch, substitute_port, LaunchSpec, LaunchedProcess};
pub use tools::require_tools;
