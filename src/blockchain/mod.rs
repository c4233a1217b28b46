//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) / node accounts
//!     → wallet.rs (key loading)
//!     → client.rs (RPC connection with timeouts, signer resolution)
//!     → transaction.rs (confirmation polling)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use types::{ChainId, DeployError, DeployResult, Deployment, DeploymentReport, SignerKind};
pub use wallet::Wallet;
