//! Deployment factory built from a compiled artifact.

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;

use crate::contract::artifact::{Artifact, ArtifactError, Artifacts};

/// Everything needed to submit a contract-creation transaction.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    bytecode: Bytes,
}

impl ContractFactory {
    /// Resolve the factory for `name` from an artifacts directory.
    pub fn load(artifacts: &Artifacts, name: &str) -> Result<Self, ArtifactError> {
        Self::from_artifact(artifacts.load(name)?)
    }

    /// Check that the artifact can be deployed without constructor arguments
    /// and queried through `name()`.
    pub fn from_artifact(artifact: Artifact) -> Result<Self, ArtifactError> {
        let name = artifact.contract_name.clone();

        let libraries = artifact.unlinked_libraries();
        if !libraries.is_empty() {
            return Err(ArtifactError::UnlinkedLibraries { name, libraries });
        }

        let bytecode: Bytes = artifact
            .bytecode
            .parse()
            .map_err(|e| ArtifactError::InvalidBytecode {
                name: name.clone(),
                reason: format!("{e}"),
            })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable(name));
        }

        if let Some(constructor) = &artifact.abi.constructor {
            if !constructor.inputs.is_empty() {
                return Err(ArtifactError::ConstructorArguments {
                    name,
                    count: constructor.inputs.len(),
                });
            }
        }

        if !has_name_accessor(&artifact.abi) {
            return Err(ArtifactError::MissingNameAccessor(name));
        }

        Ok(Self { name, bytecode })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation bytecode. No constructor arguments are appended.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }
}

fn has_name_accessor(abi: &JsonAbi) -> bool {
    abi.function("name").is_some_and(|overloads| {
        overloads
            .iter()
            .any(|f| f.inputs.is_empty() && f.outputs.len() == 1 && f.outputs[0].ty == "string")
    })
}
