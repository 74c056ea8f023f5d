//! Tunnel subsystem.
//!
//! # Data Flow
//! ```text
//! launcher.rs: control port open? → reuse : spawn daemon
//!     → discovery.rs: poll GET /api/tunnels → first https public_url
//! ```
//!
//! # Design Decisions
//! - The control port is the single source of truth for "daemon running"
//! - No public URL within the budget aborts the run

pub mod discovery;
pub mod launcher;

pub use discovery::{select_https, DiscoveryError, Tunnel, TunnelApi, TunnelList};
pub use launcher::{ensure_running, is_listening, TunnelState};
