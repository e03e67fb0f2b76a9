// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.

use std::{fs, path::PathBuf};

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::Bytes,
};
use serde::Deserialize;

use crate::core::encoding::{encode_constructor_args, EncodingError};

/// Creation bytecode and ABI of a contract, as emitted by the compiler toolchain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    /// Creation code followed by the encoded constructor arguments.
    pub fn initcode(&self, constructor_args: &[DynSolValue]) -> Result<Bytes, EncodingError> {
        if self.bytecode.is_empty() {
            return Err(EncodingError::EmptyBytecode(self.contract_name.clone()));
        }
        let args =
            encode_constructor_args(&self.contract_name, self.abi.constructor(), constructor_args)?;
        let mut initcode = Vec::with_capacity(self.bytecode.len() + args.len());
        initcode.extend_from_slice(&self.bytecode);
        initcode.extend(args);
        Ok(initcode.into())
    }
}

/// Looks up compiled artifacts by contract name.
pub trait ArtifactSource {
    fn resolve_artifact(&self, label: &str) -> Result<Artifact, ArtifactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("multiple artifacts named {label}: {}", .paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    Ambiguous { label: String, paths: Vec<PathBuf> },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse artifact {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid artifact pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("{0}")]
    Glob(#[from] glob::GlobError),
}

/// Artifacts laid out by Hardhat: `<root>/**/<ContractName>.json`.
#[derive(Debug, Clone)]
pub struct HardhatArtifacts {
    root: PathBuf,
}

impl HardhatArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn find(&self, label: &str) -> Result<PathBuf, ArtifactError> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{root}/**/{}.json", glob::Pattern::escape(label));
        let mut paths = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
        // build-info files are never named after a contract, but skip them anyway
        paths.retain(|path| !path.components().any(|c| c.as_os_str() == "build-info"));
        match paths.len() {
            0 => Err(ArtifactError::NotFound(label.to_string())),
            1 => Ok(paths.remove(0)),
            _ => {
                paths.sort();
                Err(ArtifactError::Ambiguous {
                    label: label.to_string(),
                    paths,
                })
            }
        }
    }
}

impl ArtifactSource for HardhatArtifacts {
    fn resolve_artifact(&self, label: &str) -> Result<Artifact, ArtifactError> {
        let path = self.find(label)?;
        debug!(@grey, "loading artifact {label} from {}", path.display());
        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|source| ArtifactError::Json { path, source })
    }
}
