//! Environment file subsystem.
//!
//! # Data Flow
//! ```text
//! Discovered public URL
//!     → upsert.rs (rewrite or append KEY=VALUE, seed from template if absent)
//!     → required.rs (warn about required keys and key groups still unset)
//! ```
//!
//! # Design Decisions
//! - At most one line per upserted key; the file is only written when it changes
//! - Missing required keys are reported, never fatal

pub mod required;
pub mod upsert;

pub use required::{missing_groups, missing_keys};
pub use upsert::{upsert_content, upsert_file, UpsertOutcome};
