//! Hardhat artifact lookup and parsing.
//!
//! Artifacts live under `<root>/contracts/<Source>.sol/<Name>.json`. The
//! conventional path is tried first; otherwise the tree is searched for a
//! `<Name>.json` whose `contractName` matches.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while resolving a contract factory.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact for contract '{name}' not found under {root}")]
    NotFound { name: String, root: PathBuf },

    #[error("contract name '{name}' is ambiguous, candidates: {}", format_paths(.candidates))]
    Ambiguous { name: String, candidates: Vec<PathBuf> },

    #[error("failed to read artifact {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("contract '{0}' has no bytecode, it is abstract or an interface")]
    NotDeployable(String),

    #[error("contract '{name}' has unlinked libraries: {}", .libraries.join(", "))]
    UnlinkedLibraries { name: String, libraries: Vec<String> },

    #[error("invalid bytecode for contract '{name}': {reason}")]
    InvalidBytecode { name: String, reason: String },

    #[error("contract '{name}' constructor expects {count} argument(s), deployment passes none")]
    ConstructorArguments { name: String, count: usize },

    #[error("contract '{0}' has no `name() returns (string)` accessor")]
    MissingNameAccessor(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `linkReferences`: source file → library name → placeholder offsets.
pub type LinkReferences = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// The subset of a Hardhat artifact needed for deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    /// Creation bytecode as hex. Contains `__$...$__` placeholders when
    /// libraries are unlinked.
    pub bytecode: String,
    #[serde(default)]
    pub link_references: LinkReferences,
}

impl Artifact {
    /// Parse an artifact from JSON text.
    pub fn from_json(path: &Path, content: &str) -> Result<Self, ArtifactError> {
        serde_json::from_str(content).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fully qualified library names still to be linked.
    pub fn unlinked_libraries(&self) -> Vec<String> {
        self.link_references
            .iter()
            .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
            .collect()
    }
}

/// A Hardhat artifacts directory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the artifact file for `name`.
    pub fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let conventional = self
            .root
            .join("contracts")
            .join(format!("{name}.sol"))
            .join(format!("{name}.json"));
        if conventional.is_file() {
            return Ok(conventional);
        }

        let file_name = format!("{name}.json");
        let mut candidates = Vec::new();
        collect_candidates(&self.root, &file_name, &mut candidates)?;

        // A file can be named after the contract but hold another one.
        let mut matching = Vec::new();
        for path in candidates {
            if self.read(&path)?.contract_name == name {
                matching.push(path);
            }
        }
        matching.sort();

        match matching.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_string(),
                root: self.root.clone(),
            }),
            1 => Ok(matching.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates: matching,
            }),
        }
    }

    /// Find and parse the artifact for `name`.
    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.find(name)?;
        tracing::debug!(contract = name, path = %path.display(), "Loading artifact");
        self.read(&path)
    }

    fn read(&self, path: &Path) -> Result<Artifact, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Artifact::from_json(path, &content)
    }
}

fn collect_candidates(
    dir: &Path,
    file_name: &str,
    out: &mut Vec<PathBuf>,
) -> Result<(), ArtifactError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(ArtifactError::Read {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| ArtifactError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            if entry.file_name() == "build-info" {
                continue;
            }
            collect_candidates(&path, file_name, out)?;
        } else if entry.file_name().to_str() == Some(file_name) {
            out.push(path);
        }
    }
    Ok(())
}
