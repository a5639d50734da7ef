//! Network registry: built-in presets merged with config file entries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::schema::{DeployConfig, ExplorerConfig, ExplorerKind, NetworkEntry};

/// A fully resolved, read-only target network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    /// Network name as passed on the command line.
    pub name: String,
    /// Expected chain ID.
    pub chain_id: u64,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Explorer used for verification, if any.
    pub explorer: Option<ExplorerConfig>,
    /// ZK Stack chain; plain EVM creation transactions are refused.
    pub zksync: bool,
}

impl NetworkConfig {
    fn from_entry(name: &str, entry: &NetworkEntry) -> Self {
        Self {
            name: name.to_string(),
            chain_id: entry.chain_id,
            rpc_url: entry.rpc_url.clone(),
            explorer: entry.explorer.clone(),
            zksync: entry.zksync,
        }
    }

    /// Explorer page for an address, if the network has a browser URL.
    pub fn address_url(&self, address: impl std::fmt::Display) -> Option<String> {
        self.explorer.as_ref().map(|e| {
            format!("{}/address/{}", e.browser_url.trim_end_matches('/'), address)
        })
    }
}

/// Networks available without any config file.
pub fn presets() -> BTreeMap<String, NetworkEntry> {
    let mut networks = BTreeMap::new();

    networks.insert(
        "sophonMainnet".to_string(),
        NetworkEntry {
            chain_id: 50104,
            rpc_url: "https://rpc.sophon.xyz".to_string(),
            explorer: Some(ExplorerConfig {
                kind: ExplorerKind::Etherscan,
                api_url: "https://api.sophscan.xyz/api".to_string(),
                browser_url: "https://sophscan.xyz".to_string(),
                api_key_env: Some("ETHERSCAN_SOPHON_API_KEY".to_string()),
            }),
            zksync: true,
        },
    );

    networks.insert(
        "sophonTestnet".to_string(),
        NetworkEntry {
            chain_id: 531050104,
            rpc_url: "https://rpc.testnet.sophon.xyz".to_string(),
            explorer: Some(ExplorerConfig {
                kind: ExplorerKind::Etherscan,
                api_url: "https://api-testnet.sophscan.xyz/api".to_string(),
                browser_url: "https://testnet.sophscan.xyz".to_string(),
                api_key_env: Some("ETHERSCAN_SOPHON_API_KEY".to_string()),
            }),
            zksync: true,
        },
    );

    networks.insert(
        "zkSyncTestnet".to_string(),
        NetworkEntry {
            chain_id: 300,
            rpc_url: "https://sepolia.era.zksync.dev".to_string(),
            explorer: Some(ExplorerConfig {
                kind: ExplorerKind::Etherscan,
                api_url: "https://api-testnet-era.zksync.network/api".to_string(),
                browser_url: "https://testnet-era.zksync.network".to_string(),
                api_key_env: Some("ETHERSCAN_API_KEY".to_string()),
            }),
            zksync: true,
        },
    );

    networks.insert(
        "localhost".to_string(),
        NetworkEntry {
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            explorer: None,
            zksync: false,
        },
    );

    networks
}

/// All networks known to this config: presets overridden by file entries.
pub fn all_networks(config: &DeployConfig) -> Vec<NetworkConfig> {
    let mut merged = presets();
    for (name, entry) in &config.networks {
        merged.insert(name.clone(), entry.clone());
    }
    merged
        .iter()
        .map(|(name, entry)| NetworkConfig::from_entry(name, entry))
        .collect()
}

/// Look up a single network by name. File entries shadow presets.
pub fn find_network(config: &DeployConfig, name: &str) -> Option<NetworkConfig> {
    if let Some(entry) = config.networks.get(name) {
        return Some(NetworkConfig::from_entry(name, entry));
    }
    presets()
        .get(name)
        .map(|entry| NetworkConfig::from_entry(name, entry))
}
