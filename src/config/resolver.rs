//! Run resolution: turns a loaded config plus CLI overrides into everything a
//! deployment run needs, before any network I/O happens.

use alloy::primitives::Address;

use crate::blockchain::Wallet;
use crate::config::loader::ConfigError;
use crate::config::networks::{find_network, NetworkConfig};
use crate::config::schema::{ArtifactsConfig, DeployConfig, DeploymentConfig, VerificationConfig};

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub admin: Option<String>,
    pub artifacts_dir: Option<String>,
    pub verify_delay_secs: Option<u64>,
    pub skip_verify: bool,
}

/// Everything needed to execute one deployment run.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub network: NetworkConfig,
    pub admin: Address,
    pub wallet: Wallet,
    /// Explorer API key, when the network's explorer names one and it is set.
    pub explorer_api_key: Option<String>,
    pub deployment: DeploymentConfig,
    pub artifacts: ArtifactsConfig,
    pub verification: VerificationConfig,
}

/// Resolve a run against `network_name`.
///
/// `env` looks up environment variables; the binary passes `std::env::var`,
/// tests pass a map.
pub fn resolve<F>(
    config: &DeployConfig,
    network_name: &str,
    overrides: &RunOverrides,
    env: F,
) -> Result<ResolvedRun, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let network = find_network(config, network_name)
        .ok_or_else(|| ConfigError::UnknownNetwork(network_name.to_string()))?;

    let admin_str = overrides
        .admin
        .clone()
        .or_else(|| config.deployment.admin.clone())
        .ok_or(ConfigError::MissingAdmin)?;
    let admin: Address = admin_str
        .parse()
        .map_err(|_| ConfigError::InvalidAdmin(admin_str.clone()))?;

    let key_var = &config.deployment.private_key_env;
    let private_key = env(key_var)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(key_var.clone()))?;
    let wallet = Wallet::from_private_key(&private_key, network.chain_id)?;

    let explorer_api_key = network
        .explorer
        .as_ref()
        .and_then(|e| e.api_key_env.as_deref())
        .and_then(|var| {
            let key = env(var);
            if key.is_none() {
                tracing::warn!(env = var, "Explorer API key not set");
            }
            key
        });

    let mut deployment = config.deployment.clone();
    if let Some(delay) = overrides.verify_delay_secs {
        deployment.verify_delay_secs = delay;
    }

    let mut artifacts = config.artifacts.clone();
    if let Some(dir) = &overrides.artifacts_dir {
        artifacts.dir = dir.clone();
    }

    let mut verification = config.verification.clone();
    if overrides.skip_verify {
        verification.enabled = false;
    }

    tracing::info!(
        network = %network.name,
        chain_id = network.chain_id,
        rpc_url = %network.rpc_url,
        deployer = %wallet.address(),
        admin = %admin,
        "Run resolved"
    );

    Ok(ResolvedRun {
        network,
        admin,
        wallet,
        explorer_api_key,
        deployment,
        artifacts,
        verification,
    })
}
