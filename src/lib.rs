//! Local development environment bootstrapper library.
//!
//! Brings up a tunnel daemon, publishes its public URL into an environment
//! file, launches the application server and waits for both the local and
//! the public health endpoints.

// Core sequence
pub mod env_file;
pub mod health;
pub mod lifecycle;
pub mod process;
pub mod tunnel;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;

pub use config::schema::BootstrapConfig;
pub use error::{BootstrapError, Result};
pub use lifecycle::{Bootstrap, BootstrapReport};
