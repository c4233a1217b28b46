//! Contract factory lookup.
//!
//! # Data Flow
//! ```text
//! artifacts/ (Hardhat compile output)
//!     → artifact.rs (locate & parse <Name>.json)
//!     → factory.rs (bytecode, constructor and accessor checks)
//!     → ContractFactory handed to the deployer
//! ```

pub mod artifact;
pub mod factory;
pub mod token;

pub use artifact::{Artifact, ArtifactError, Artifacts};
pub use factory::ContractFactory;
pub use token::TokenMetadata;
