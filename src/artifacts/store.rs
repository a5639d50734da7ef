//! Artifact lookup on disk.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::artifacts::types::{ArtifactError, ArtifactResult, BuildInfo, ContractArtifact};
use crate::config::schema::{ArtifactLayout, ArtifactsConfig};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    source_name: Option<String>,
    bytecode: RawBytecode,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

/// Hardhat writes a hex string, Foundry an object with `object`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

/// Reads compiled artifacts from an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    layout: ArtifactLayout,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>, layout: ArtifactLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn from_config(config: &ArtifactsConfig) -> Self {
        Self::new(&config.dir, config.layout)
    }

    /// Load the artifact for `contract`.
    pub fn load(&self, contract: &str) -> ArtifactResult<ContractArtifact> {
        let path = self.locate(contract)?;
        let content = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let artifact = parse_artifact(contract, &content).map_err(|e| match e {
            ArtifactError::Parse { source, .. } => ArtifactError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;

        tracing::debug!(
            contract = contract,
            path = %path.display(),
            bytecode_len = artifact.bytecode.len(),
            "Artifact loaded"
        );
        Ok(artifact)
    }

    /// Directory the compiler writes build-info files to.
    pub fn build_info_dir(&self) -> PathBuf {
        self.root.join("build-info")
    }

    /// Find the build-info whose input includes `source_path`.
    ///
    /// Build-info files are named by content hash, so every `*.json` in
    /// [`Self::build_info_dir`] is a candidate. Without a source path the
    /// directory must hold exactly one file. Unreadable files are skipped.
    pub fn find_build_info(&self, source_path: Option<&str>) -> Option<BuildInfo> {
        let dir = self.build_info_dir();
        let entries = fs::read_dir(&dir).ok()?;
        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        if source_path.is_none() && files.len() != 1 {
            tracing::debug!(dir = %dir.display(), count = files.len(), "Ambiguous build-info without a source path");
            return None;
        }

        files.iter().find_map(|path| match load_build_info(path) {
            Ok(info) if source_path.map_or(true, |source| info.compiles(source)) => {
                tracing::debug!(path = %path.display(), "Build-info selected");
                Some(info)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable build-info");
                None
            }
        })
    }

    fn locate(&self, contract: &str) -> ArtifactResult<PathBuf> {
        let file_dir = format!("{}.sol", contract);
        let file_name = format!("{}.json", contract);

        if self.layout == ArtifactLayout::Foundry {
            let direct = self.root.join(&file_dir).join(&file_name);
            if direct.is_file() {
                return Ok(direct);
            }
        }

        find_recursive(&self.root, &file_dir, &file_name).ok_or_else(|| ArtifactError::NotFound {
            contract: contract.to_string(),
            dir: self.root.display().to_string(),
        })
    }
}

fn find_recursive(dir: &Path, file_dir: &str, file_name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(file_dir) {
            let candidate = path.join(file_name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        subdirs.push(path);
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| find_recursive(sub, file_dir, file_name))
}

/// Parse artifact JSON for `contract`.
pub fn parse_artifact(contract: &str, content: &str) -> ArtifactResult<ContractArtifact> {
    let raw: RawArtifact = serde_json::from_str(content).map_err(|source| ArtifactError::Parse {
        path: contract.to_string(),
        source,
    })?;

    let hex = raw.bytecode.hex().trim();
    if hex.is_empty() || hex == "0x" {
        return Err(ArtifactError::EmptyBytecode(contract.to_string()));
    }
    let bytecode: Bytes = hex.parse().map_err(|e| ArtifactError::InvalidBytecode {
        contract: contract.to_string(),
        reason: format!("{}", e),
    })?;

    let metadata = raw.metadata.as_ref().and_then(normalize_metadata);
    let compiler_version = metadata
        .as_ref()
        .and_then(|m| m.pointer("/compiler/version"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let target_source = metadata.as_ref().and_then(|m| {
        m.pointer("/settings/compilationTarget")
            .and_then(|t| t.as_object())
            .and_then(|t| {
                t.iter()
                    .find(|(_, name)| name.as_str() == Some(contract))
                    .map(|(path, _)| path.clone())
            })
    });

    Ok(ContractArtifact {
        name: contract.to_string(),
        source_path: raw.source_name.or(target_source),
        compiler_version,
        bytecode,
    })
}

/// Foundry stores metadata as an object; older tools as a JSON string.
fn normalize_metadata(value: &serde_json::Value) -> Option<serde_json::Value> {
    match value {
        serde_json::Value::String(s) => serde_json::from_str(s).ok(),
        serde_json::Value::Object(_) => Some(value.clone()),
        _ => None,
    }
}

/// Load a compiler build-info file.
pub fn load_build_info(path: &Path) -> ArtifactResult<BuildInfo> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}
