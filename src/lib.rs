//! Deploys a compiled token contract and reads back its name.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod contract;
pub mod deploy;
pub mod observability;

pub use blockchain::{BlockchainClient, DeployError, DeployResult, DeploymentReport};
pub use config::DeployConfig;
pub use contract::{Artifacts, ContractFactory};
