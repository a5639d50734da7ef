//! End-of-run summary.

use alloy::primitives::Address;
use serde::Serialize;
use uuid::Uuid;

use crate::config::NetworkConfig;
use crate::deploy::types::DeploymentRecord;
use crate::verify::{VerificationOutcome, VerificationStatus};

/// One contract's line in the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub record: DeploymentRecord,
    pub verification: Option<VerificationStatus>,
    pub explorer_url: Option<String>,
}

/// Summary printed when a run finishes. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub run_id: Uuid,
    pub network: String,
    pub chain_id: u64,
    pub deployer: Address,
    pub admin: Address,
    pub dry_run: bool,
    pub contracts: Vec<ReportEntry>,
}

impl DeploymentReport {
    pub fn new(
        run_id: Uuid,
        network: &NetworkConfig,
        deployer: Address,
        admin: Address,
        records: Vec<DeploymentRecord>,
        verifications: Vec<VerificationOutcome>,
    ) -> Self {
        let contracts = records
            .into_iter()
            .map(|record| {
                let verification = verifications
                    .iter()
                    .find(|v| v.contract_name == record.contract_name)
                    .map(|v| v.status.clone());
                let explorer_url = network.address_url(record.deployed_address);
                ReportEntry {
                    record,
                    verification,
                    explorer_url,
                }
            })
            .collect();

        Self {
            run_id,
            network: network.name.clone(),
            chain_id: network.chain_id,
            deployer,
            admin,
            dry_run: false,
            contracts,
        }
    }

    /// Report for predicted addresses; nothing was sent.
    pub fn predicted(
        run_id: Uuid,
        network: &NetworkConfig,
        deployer: Address,
        admin: Address,
        records: Vec<DeploymentRecord>,
    ) -> Self {
        let mut report = Self::new(run_id, network, deployer, admin, records, Vec::new());
        report.dry_run = true;
        report
    }

    /// Address of a contract in this report.
    pub fn address_of(&self, contract: &str) -> Option<Address> {
        self.contracts
            .iter()
            .find(|c| c.record.contract_name == contract)
            .map(|c| c.record.deployed_address)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary on stdout.
    pub fn print(&self) {
        let heading = if self.dry_run { "Predicted deployment" } else { "Deployment" };
        println!(
            "{} on {} (chain {}) from {}",
            heading, self.network, self.chain_id, self.deployer
        );
        for entry in &self.contracts {
            println!("  {:<20} {}", entry.record.contract_name, entry.record.deployed_address);
            if !entry.record.constructor_args.is_empty() {
                let args: Vec<String> = entry
                    .record
                    .constructor_args
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("    args:         ({})", args.join(", "));
            }
            if let Some(tx) = entry.record.tx_hash {
                println!("    tx:           {}", tx);
            }
            if let Some(status) = &entry.verification {
                println!("    verification: {}", describe(status));
            }
            if let Some(url) = &entry.explorer_url {
                println!("    explorer:     {}", url);
            }
        }
    }
}

fn describe(status: &VerificationStatus) -> String {
    match status {
        VerificationStatus::Verified => "verified".into(),
        VerificationStatus::AlreadyVerified => "already verified".into(),
        VerificationStatus::Submitted { reference } => format!("submitted ({})", reference),
        VerificationStatus::Failed { reason } => format!("failed: {}", reason),
        VerificationStatus::Skipped { reason } => format!("skipped: {}", reason),
    }
}
