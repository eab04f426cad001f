//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//!     → used once at startup to build the collector and listener
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the server list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::ExporterConfig;
pub use schema::{CollectorConfig, HttpClientConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
