//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Check tools → Tunnel up → Discover URL → Update env file
//!     → Launch server → Local health → Public health
//!
//! Summary (summary.rs):
//!     BootstrapReport → one structured log block
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: each step gates the next
//! - Fatal steps return BootstrapError; health steps only warn
//! - The orchestrator exits after the checks; launched processes keep running

pub mod startup;
pub mod summary;

pub use startup::{Bootstrap, BootstrapReport};
pub use summary::log_summary;
