//! Subcommand implementations.
//!
//! # Design Decisions
//! - Fail fast: every precondition (network, admin, key, artifacts) is checked
//!   before the first RPC call
//! - ZK Stack networks are refused up front; their deployments are not plain
//!   EVM creation transactions
//! - Steps run strictly in order; nothing is spawned

use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use crate::artifacts::ArtifactStore;
use crate::blockchain::ChainClient;
use crate::cli::DeployArgs;
use crate::config::{networks::all_networks, resolve, DeployConfig, ResolvedRun};
use crate::deploy::{load_plan_artifacts, DeployError, DeploymentPlan, DeploymentReport, DeploymentRunner};
use crate::verify::ExplorerVerifier;

/// Run the `deploy` subcommand.
///
/// `env` looks up environment variables (private key, explorer API key).
pub async fn deploy<F>(
    config: &DeployConfig,
    args: &DeployArgs,
    env: F,
) -> Result<DeploymentReport, DeployError>
where
    F: Fn(&str) -> Option<String>,
{
    let run = resolve(config, &args.network, &args.overrides(), env)?;
    if run.network.zksync {
        return Err(DeployError::ZkStackNetwork(run.network.name.clone()));
    }
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "run",
        run_id = %run_id,
        network = %run.network.name,
        chain_id = run.network.chain_id
    );

    execute(run, args, run_id).instrument(span).await
}

async fn execute(
    run: ResolvedRun,
    args: &DeployArgs,
    run_id: Uuid,
) -> Result<DeploymentReport, DeployError> {
    let plan = DeploymentPlan::sablier_flow();
    let store = ArtifactStore::from_config(&run.artifacts);
    let artifacts = load_plan_artifacts(&plan, &store)?;

    let client = ChainClient::connect(
        &run.network,
        run.wallet.clone(),
        run.deployment.rpc_timeout_secs,
        run.deployment.receipt_timeout_secs,
    )?;
    client.verify_chain_id().await?;

    let deployer = run.wallet.address();

    if args.dry_run {
        let nonce = client.get_transaction_count(deployer).await?;
        let records = plan.predict(run.admin, deployer, nonce)?;
        tracing::info!(nonce = nonce, "Dry run: no transactions sent");
        return Ok(DeploymentReport::predicted(
            run_id,
            &run.network,
            deployer,
            run.admin,
            records,
        ));
    }

    let verifier = ExplorerVerifier::for_run(&run);
    if let Some(v) = &verifier {
        tracing::info!(api_url = %v.api_url(), "Verification enabled");
    }
    let runner = DeploymentRunner::new(
        client,
        verifier,
        Duration::from_secs(run.deployment.verify_delay_secs),
    );
    let outcome = runner.run(&plan, &artifacts, run.admin).await?;

    Ok(DeploymentReport::new(
        run_id,
        &run.network,
        deployer,
        run.admin,
        outcome.records,
        outcome.verifications,
    ))
}

/// Run the `networks` subcommand: one line per known network.
pub fn networks(config: &DeployConfig) -> Vec<String> {
    all_networks(config)
        .into_iter()
        .map(|net| {
            let explorer = net
                .explorer
                .as_ref()
                .map(|e| e.browser_url.as_str())
                .unwrap_or("-");
            let vm = if net.zksync { "zksync" } else { "evm" };
            format!(
                "{:<16} chain {:<10} {:<6} rpc {:<40} explorer {}",
                net.name, net.chain_id, vm, net.rpc_url, explorer
            )
        })
        .collect()
}
