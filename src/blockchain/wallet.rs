//! Local signing keys.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{DeployError, DeployResult};

/// Environment variable holding one or more comma-separated private keys.
pub const PRIVATE_KEY_ENV_VAR: &str = "DEPLOYER_PRIVATE_KEY";

/// A signer whose key is held in this process.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> DeployResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| DeployError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Pick the first key of a comma-separated list. `None` when the list
    /// holds no keys at all.
    pub fn first_of(keys: &str) -> DeployResult<Option<Self>> {
        keys.split(',')
            .map(str::trim)
            .find(|key| !key.is_empty())
            .map(Self::from_private_key)
            .transpose()
    }

    /// Load the first configured key from `DEPLOYER_PRIVATE_KEY`.
    ///
    /// Returns `None` when the variable is unset or empty, in which case the
    /// node's own accounts are used.
    pub fn from_env() -> DeployResult<Option<Self>> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(keys) => Self::first_of(&keys),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(DeployError::Wallet(format!(
                "Environment variable {} is not valid UTF-8",
                PRIVATE_KEY_ENV_VAR
            ))),
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn into_signer(self) -> PrivateKeySigner {
        self.signer
    }
}
