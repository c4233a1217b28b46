//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{DeployConfig, NetworkConfig, LOCALHOST_NETWORK};
use crate::config::validation::{validate_config, ValidationError};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    UnknownNetwork(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::UnknownNetwork(name) => write!(f, "Unknown network '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
///
/// The built-in `localhost` network is added back when the file defines
/// other networks but not that one.
pub fn parse_config(content: &str) -> Result<DeployConfig, ConfigError> {
    let mut config: DeployConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    config
        .networks
        .entry(LOCALHOST_NETWORK.to_string())
        .or_default();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the configuration for a run.
///
/// An explicitly requested file must exist. Without one, `deploy.toml` in the
/// working directory is used if present, and built-in defaults otherwise.
pub fn load_or_default(explicit: Option<&Path>) -> Result<DeployConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!(path = %fallback.display(), "Using config file from working directory");
        return load_config(fallback);
    }

    Ok(DeployConfig::default())
}

/// Pick the network for this run: the requested one, or the configured default.
pub fn select_network<'a>(
    config: &'a DeployConfig,
    requested: Option<&str>,
) -> Result<(&'a str, &'a NetworkConfig), ConfigError> {
    let name = requested.unwrap_or(&config.default_network);
    config
        .networks
        .get_key_value(name)
        .map(|(name, network)| (name.as_str(), network))
        .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
}
