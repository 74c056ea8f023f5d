//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Each run is wrapped in a `bootstrap` span with a `run_id` (UUID v4)
//! so interleaved runs can be told apart in aggregated logs.
//! ```

pub mod logging;
