//! Deployment run orchestration.
//!
//! # Responsibilities
//! - Deploy every planned contract in order, feeding earlier addresses into
//!   later constructor arguments
//! - Abort on the first deployment failure
//! - Verify each deployed contract exactly once, after all deployments,
//!   downgrading verification errors to logged outcomes

use std::collections::BTreeMap;
use std::time::Duration;

use alloy::primitives::Address;

use crate::artifacts::{ArtifactError, ArtifactStore, ContractArtifact};
use crate::deploy::deployer::ContractDeployer;
use crate::deploy::plan::DeploymentPlan;
use crate::deploy::types::{DeployError, DeployResult, DeploymentRecord};
use crate::verify::{SourceVerifier, VerificationOutcome, VerificationRequest, VerificationStatus};

/// Artifacts for a plan, keyed by contract name.
pub type ArtifactSet = BTreeMap<String, ContractArtifact>;

/// Load every artifact a plan needs, so a missing one is found before the
/// first transaction is sent.
pub fn load_plan_artifacts(
    plan: &DeploymentPlan,
    store: &ArtifactStore,
) -> Result<ArtifactSet, ArtifactError> {
    plan.names()
        .map(|name| Ok((name.to_string(), store.load(name)?)))
        .collect()
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub records: Vec<DeploymentRecord>,
    pub verifications: Vec<VerificationOutcome>,
}

/// Executes a plan against a deployer and an optional verifier.
pub struct DeploymentRunner<D, V> {
    deployer: D,
    verifier: Option<V>,
    verify_delay: Duration,
}

impl<D, V> DeploymentRunner<D, V>
where
    D: ContractDeployer,
    V: SourceVerifier,
{
    pub fn new(deployer: D, verifier: Option<V>, verify_delay: Duration) -> Self {
        Self {
            deployer,
            verifier,
            verify_delay,
        }
    }

    /// Deploy then verify. Only deployment errors are returned.
    pub async fn run(
        &self,
        plan: &DeploymentPlan,
        artifacts: &ArtifactSet,
        admin: Address,
    ) -> DeployResult<RunOutcome> {
        if let Some(missing) = plan.names().find(|name| !artifacts.contains_key(*name)) {
            return Err(DeployError::Plan(format!("no artifact loaded for {}", missing)));
        }

        let records = self.deploy_all(plan, artifacts, admin).await?;
        let verifications = self.verify_all(&records, artifacts).await;
        Ok(RunOutcome {
            records,
            verifications,
        })
    }

    async fn deploy_all(
        &self,
        plan: &DeploymentPlan,
        artifacts: &ArtifactSet,
        admin: Address,
    ) -> DeployResult<Vec<DeploymentRecord>> {
        let mut records: Vec<DeploymentRecord> = Vec::with_capacity(plan.contracts().len());

        for entry in plan.contracts() {
            let artifact = artifacts.get(&entry.name).ok_or_else(|| {
                DeployError::Plan(format!("no artifact loaded for {}", entry.name))
            })?;
            let args = plan.resolve_args(entry, admin, &records)?;

            tracing::info!(
                contract = %entry.name,
                args = ?args.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "Deploying"
            );

            let receipt = self
                .deployer
                .deploy(artifact, &args)
                .await
                .map_err(|source| DeployError::Failed {
                    contract: entry.name.clone(),
                    source,
                })?;

            tracing::info!(
                contract = %entry.name,
                address = %receipt.contract_address,
                tx_hash = %receipt.tx_hash,
                "Deployed"
            );

            records.push(DeploymentRecord {
                contract_name: entry.name.clone(),
                constructor_args: args,
                deployed_address: receipt.contract_address,
                tx_hash: Some(receipt.tx_hash),
            });
        }

        Ok(records)
    }

    async fn verify_all(
        &self,
        records: &[DeploymentRecord],
        artifacts: &ArtifactSet,
    ) -> Vec<VerificationOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            let status = match (&self.verifier, artifacts.get(&record.contract_name)) {
                (Some(verifier), Some(artifact)) => {
                    self.verify_one(verifier, record, artifact).await
                }
                (None, _) => VerificationStatus::Skipped {
                    reason: "no verifier configured".into(),
                },
                (Some(_), None) => VerificationStatus::Skipped {
                    reason: "artifact unavailable".into(),
                },
            };
            outcomes.push(VerificationOutcome {
                contract_name: record.contract_name.clone(),
                address: record.deployed_address,
                status,
            });
        }
        outcomes
    }

    async fn verify_one(
        &self,
        verifier: &V,
        record: &DeploymentRecord,
        artifact: &ContractArtifact,
    ) -> VerificationStatus {
        tracing::info!(
            contract = %record.contract_name,
            delay_secs = self.verify_delay.as_secs(),
            "Waiting before verification"
        );
        tokio::time::sleep(self.verify_delay).await;

        let request = VerificationRequest::new(record, artifact);
        match verifier.verify(&request).await {
            Ok(status) => {
                tracing::info!(
                    contract = %record.contract_name,
                    address = %record.deployed_address,
                    status = ?status,
                    verified = status.is_success(),
                    "Verification finished"
                );
                status
            }
            Err(e) => {
                tracing::warn!(
                    contract = %record.contract_name,
                    address = %record.deployed_address,
                    error = %e,
                    "Verification failed"
                );
                VerificationStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
