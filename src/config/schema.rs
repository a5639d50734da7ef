//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a deployment run.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default environment variable holding the deployer private key.
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeployConfig {
    /// Deployment run settings (admin, key source, delays).
    pub deployment: DeploymentConfig,

    /// Where compiled contract artifacts live.
    pub artifacts: ArtifactsConfig,

    /// Block-explorer verification settings.
    pub verification: VerificationConfig,

    /// Target networks keyed by name. Merged over the built-in presets.
    pub networks: BTreeMap<String, NetworkEntry>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deployment run settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Admin address passed to `SablierFlow`. No default: the operator decides.
    pub admin: Option<String>,

    /// Environment variable the private key is read from.
    pub private_key_env: String,

    /// Grace period before each verification request, in seconds.
    pub verify_delay_secs: u64,

    /// Timeout for read-only RPC queries (chain id, nonce) in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a creation receipt in seconds.
    pub receipt_timeout_secs: u64,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            admin: None,
            private_key_env: DEFAULT_PRIVATE_KEY_ENV.to_string(),
            verify_delay_secs: 20,
            rpc_timeout_secs: 30,
            receipt_timeout_secs: 300,
        }
    }
}

/// Artifact directory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactLayout {
    /// `out/<Name>.sol/<Name>.json`
    #[default]
    Foundry,
    /// `artifacts/<source path>/<Name>.sol/<Name>.json`
    Hardhat,
}

/// Artifact location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Root directory of compiled artifacts.
    pub dir: String,

    /// Directory layout.
    pub layout: ArtifactLayout,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "out".to_string(),
            layout: ArtifactLayout::Foundry,
        }
    }
}

/// Verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Submit verification requests after deployment.
    pub enabled: bool,

    /// Path to a compiler build-info file holding the standard-JSON input.
    /// When unset, `<artifacts.dir>/build-info/*.json` is searched per contract.
    pub build_info: Option<String>,

    /// zksolc version reported to zkSync-style explorers (e.g. "v1.5.12").
    pub zksolc_version: Option<String>,

    /// How many times to poll the explorer for the verification status.
    /// Zero means submit only.
    pub status_poll_attempts: u32,

    /// Delay between status polls in seconds.
    pub status_poll_interval_secs: u64,

    /// Timeout for each explorer HTTP request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            build_info: None,
            zksolc_version: None,
            status_poll_attempts: 6,
            status_poll_interval_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

/// A network entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkEntry {
    /// Chain ID (e.g., 50104 for Sophon mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Block explorer used for source verification.
    #[serde(default)]
    pub explorer: Option<ExplorerConfig>,

    /// ZK Stack chain. Contracts there need zksolc bytecode and an EIP-712
    /// deployment transaction, which this tool does not send.
    #[serde(default)]
    pub zksync: bool,
}

/// Explorer API flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerKind {
    /// Etherscan-compatible `module=contract&action=verifysourcecode` API.
    #[default]
    Etherscan,
    /// zkSync-style contract verification service.
    Zksync,
}

/// Block explorer endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// API flavour.
    #[serde(default)]
    pub kind: ExplorerKind,

    /// Verification API endpoint.
    pub api_url: String,

    /// Human-facing explorer base URL.
    pub browser_url: String,

    /// Environment variable holding the explorer API key, if one is needed.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
