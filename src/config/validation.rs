//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the default network is actually defined
//! - Validate value ranges (timeouts > 0, confirmations >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::{DeployConfig, NetworkConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `networks.localhost.rpc_url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::new(
            "default_network",
            format!("network '{}' is not defined", config.default_network),
        ));
    }

    for (name, network) in &config.networks {
        validate_network(name, network, &mut errors);
    }

    if config.contract.name.trim().is_empty() {
        errors.push(ValidationError::new("contract.name", "must not be empty"));
    }

    if config.contract.artifacts_dir.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "contract.artifacts_dir",
            "must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(name: &str, network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    let field = |key: &str| format!("networks.{name}.{key}");

    match network.rpc_url.parse::<url::Url>() {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field("rpc_url"),
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            field("rpc_url"),
            format!("invalid URL '{}': {}", network.rpc_url, e),
        )),
    }

    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            field("rpc_timeout_secs"),
            "must be greater than 0",
        ));
    }

    if network.confirmation_blocks == 0 {
        errors.push(ValidationError::new(
            field("confirmation_blocks"),
            "must be at least 1",
        ));
    }

    if network.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            field("poll_interval_ms"),
            "must be greater than 0",
        ));
    }

    if network.confirmation_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            field("confirmation_timeout_secs"),
            "must be greater than 0 when set",
        ));
    }
}
