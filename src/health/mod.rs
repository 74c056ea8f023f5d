//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Server launched
//!     → probe.rs: poll http://<app.host>:<app.port>/health
//!     → probe.rs: poll <public_url>/health through the tunnel
//!     → HealthStatus per endpoint, carried into the startup summary
//! ```
//!
//! # Design Decisions
//! - Healthy means a non-error status with a JSON body
//! - Both checks are advisory: failures warn, the run still completes

pub mod probe;

pub use probe::{check, health_url, probe, HealthStatus, ProbeError};
