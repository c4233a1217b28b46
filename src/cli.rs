use std::path::PathBuf;

use clap::Parser;

use crate::config::validation::validate_config;
use crate::config::{load_or_default, ConfigError, DeployConfig};

#[derive(Debug, Parser)]
#[command(name = "token-deployer")]
#[command(version, about = "Deploy a compiled token contract and read back its name", long_about = None)]
pub struct Cli {
    /// TOML config file [default: ./deploy.toml when present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Network to deploy to, as named in the config
    #[arg(short, long)]
    pub network: Option<String>,

    /// Contract to deploy [default: PlatformToken]
    #[arg(long)]
    pub contract: Option<String>,

    /// Hardhat artifacts directory [default: ./artifacts]
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, apply command-line overrides and validate the
    /// result.
    pub fn load_config(&self) -> Result<DeployConfig, ConfigError> {
        let mut config = load_or_default(self.config.as_deref())?;
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut DeployConfig) {
        if let Some(contract) = &self.contract {
            config.contract.name = contract.clone();
        }
        if let Some(artifacts) = &self.artifacts {
            config.contract.artifacts_dir = artifacts.clone();
        }
    }
}
