//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! deploy.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DeployConfig (validated, immutable)
//!     → CLI overrides applied by main
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so no file is needed for a local node
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, select_network, ConfigError};
pub use schema::{ContractConfig, DeployConfig, NetworkConfig, ObservabilityConfig};
