//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `deploy.toml`.
//! Every field has a default so an absent or empty file reproduces the
//! plain `localhost` deployment.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name of the network that always exists unless a config file redefines it.
pub const LOCALHOST_NETWORK: &str = "localhost";

/// Root configuration for a deployment run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Network used when `--network` is not given.
    pub default_network: String,

    /// Named networks (e.g. `localhost`, `sepolia`).
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Contract to deploy and where its compiled artifact lives.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(LOCALHOST_NETWORK.to_string(), NetworkConfig::default());
        Self {
            default_network: LOCALHOST_NETWORK.to_string(),
            networks,
            contract: ContractConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DeployConfig {
    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }
}

/// JSON-RPC network settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Expected chain ID. Checked on connect when set.
    pub chain_id: Option<u64>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Block depth required before a deployment counts as confirmed.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound on the confirmation wait. `None` waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,
}

impl NetworkConfig {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: None,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            poll_interval_ms: 1000,
            confirmation_timeout_secs: None,
        }
    }
}

/// Which contract to deploy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract name as it appears in the compiled artifact.
    pub name: String,

    /// Root of the Hardhat artifacts tree.
    pub artifacts_dir: PathBuf,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: "PlatformToken".to_string(),
            artifacts_dir: PathBuf::from("artifacts"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
