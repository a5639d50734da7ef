//! Compiled artifact types and error definitions.

use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading compiler output.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact for {contract} not found under {dir}")]
    NotFound { contract: String, dir: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Artifact for {0} has no creation bytecode (abstract contract or interface?)")]
    EmptyBytecode(String),

    #[error("Artifact for {contract} has invalid bytecode (unlinked library?): {reason}")]
    InvalidBytecode { contract: String, reason: String },
}

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// A deployable contract as produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Contract name, e.g. `SablierFlow`.
    pub name: String,
    /// Source file the contract is defined in, e.g. `src/SablierFlow.sol`.
    pub source_path: Option<String>,
    /// Long compiler version, e.g. `0.8.26+commit.8a97fa7a`.
    pub compiler_version: Option<String>,
    /// Creation bytecode without constructor arguments.
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// `path:Name` form used by explorers to pick the contract out of a
    /// multi-file standard-JSON input.
    pub fn fully_qualified_name(&self) -> String {
        match &self.source_path {
            Some(path) => format!("{}:{}", path, self.name),
            None => self.name.clone(),
        }
    }
}

/// Compiler build-info file (Foundry and Hardhat share these fields).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Short solc version, e.g. `0.8.26`.
    pub solc_version: String,
    /// Long solc version with commit, when present.
    #[serde(default)]
    pub solc_long_version: Option<String>,
    /// Standard-JSON compiler input.
    pub input: serde_json::Value,
}

impl BuildInfo {
    /// Most specific compiler version available.
    pub fn compiler_version(&self) -> &str {
        self.solc_long_version.as_deref().unwrap_or(&self.solc_version)
    }

    /// Whether `source_path` was part of this compilation.
    pub fn compiles(&self, source_path: &str) -> bool {
        self.input
            .get("sources")
            .and_then(|s| s.as_object())
            .is_some_and(|sources| sources.contains_key(source_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_name() {
        let mut artifact = ContractArtifact {
            name: "SablierFlow".into(),
            source_path: Some("src/SablierFlow.sol".into()),
            compiler_version: None,
            bytecode: Bytes::new(),
        };
        assert_eq!(artifact.fully_qualified_name(), "src/SablierFlow.sol:SablierFlow");
        artifact.source_path = None;
        assert_eq!(artifact.fully_qualified_name(), "SablierFlow");
    }

    #[test]
    fn test_build_info_version() {
        let info: BuildInfo = serde_json::from_str(
            r#"{"solcVersion":"0.8.26","solcLongVersion":"0.8.26+commit.8a97fa7a","input":{}}"#,
        )
        .unwrap();
        assert_eq!(info.compiler_version(), "0.8.26+commit.8a97fa7a");

        let info: BuildInfo =
            serde_json::from_str(r#"{"solcVersion":"0.8.26","input":{}}"#).unwrap();
        assert_eq!(info.compiler_version(), "0.8.26");
    }
}
