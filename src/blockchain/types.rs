//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::config::ConfigError;
use crate::contract::ArtifactError;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during a deployment run.
#[derive(Debug, Error)]
pub enum DeployError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {seconds} seconds during {operation}")]
    Timeout { operation: &'static str, seconds: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Invalid private key format.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Neither a configured key nor a node-managed account is available.
    #[error("No signer available: set {env_var} or use a node with unlocked accounts")]
    NoSigner { env_var: &'static str },

    /// Deployment transaction was reverted on-chain.
    #[error("Deployment transaction {0} reverted")]
    Reverted(TxHash),

    /// Receipt did not carry a created contract address.
    #[error("Transaction {0} did not create a contract")]
    NoContractAddress(TxHash),

    /// Configured confirmation timeout elapsed.
    #[error("Transaction {tx_hash} not confirmed within {seconds} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, seconds: u64 },

    /// Read call against the deployed contract failed.
    #[error("Call to {function} on {address} failed: {reason}")]
    Call {
        function: &'static str,
        address: Address,
        reason: String,
    },

    /// Contract factory could not be resolved.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Configuration could not be loaded.
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// Writing the deployment summary failed.
    #[error("Failed to write deployment summary")]
    Output(#[from] std::io::Error),
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Who signs the deployment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind {
    /// Key held in this process.
    Local,
    /// Account unlocked on the node (`eth_accounts`).
    Node,
}

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is pending in mempool.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed {
        block_number: u64,
        contract_address: Address,
    },
}

/// A confirmed contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub tx_hash: TxHash,
    pub address: Address,
    pub block_number: u64,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub deployer: Address,
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub token_name: String,
}
