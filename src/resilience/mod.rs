//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Readiness wait (tunnel URL, local health, public health):
//!     → timeouts.rs (every HTTP probe has a deadline)
//!     → retries.rs (fixed attempts, fixed delay between them)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retry budgets are fixed per probe and configured, never adaptive

pub mod retries;
pub mod timeouts;

pub use retries::{poll_until_ready, Exhausted, Ready, RetryPolicy};
