//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → consumed once by startup to build the handler chain
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the chain is built from it exactly once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DocumentConfig;
pub use schema::FallbackConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SeedEntry;
pub use schema::ServiceConfig;
pub use schema::SourceConfig;
pub use schema::StoreConfig;
