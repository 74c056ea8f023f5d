//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BootstrapConfig (validated, immutable)
//!     → CLI / PORT overrides applied by the binary, then re-validated
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a missing file means a working default setup
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AppConfig, BootstrapConfig, EnvFileConfig, HealthConfig, LogFormat, ObservabilityConfig,
    RetrySettings, ServerConfig, TunnelConfig,
};
pub use validation::{resolve_port, validate_config, ValidationError};
