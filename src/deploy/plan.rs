//! Deployment plans: which contracts to deploy, in what order, with what arguments.
//!
//! A constructor argument may reference the address of a contract deployed
//! earlier in the same plan. Plans with forward or unknown references are
//! rejected at construction, so the runner can never deploy a dependent
//! contract before its dependency.

use std::collections::HashSet;

use alloy::primitives::Address;

use crate::deploy::args::ConstructorArg;
use crate::deploy::types::{DeployError, DeployResult, DeploymentRecord};

/// NFT descriptor contract name.
pub const FLOW_NFT_DESCRIPTOR: &str = "FlowNFTDescriptor";

/// Streaming contract name.
pub const SABLIER_FLOW: &str = "SablierFlow";

/// Where a constructor argument value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSource {
    /// The operator-supplied admin address.
    Admin,
    /// Address of a contract deployed earlier in the plan.
    DeployedAddress(String),
    /// A fixed value.
    Literal(ConstructorArg),
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedContract {
    pub name: String,
    pub args: Vec<ArgSource>,
}

/// Ordered list of contracts to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    contracts: Vec<PlannedContract>,
}

impl DeploymentPlan {
    /// Build a plan, checking names are unique and references point backwards.
    pub fn new(contracts: Vec<PlannedContract>) -> DeployResult<Self> {
        let mut seen = HashSet::new();
        for contract in &contracts {
            for arg in &contract.args {
                if let ArgSource::DeployedAddress(dep) = arg {
                    if !seen.contains(dep.as_str()) {
                        return Err(DeployError::Plan(format!(
                            "{} references {} which is not deployed before it",
                            contract.name, dep
                        )));
                    }
                }
            }
            if !seen.insert(contract.name.as_str()) {
                return Err(DeployError::Plan(format!(
                    "{} appears more than once",
                    contract.name
                )));
            }
        }
        Ok(Self { contracts })
    }

    /// `FlowNFTDescriptor()` then `SablierFlow(admin, descriptor)`.
    pub fn sablier_flow() -> Self {
        Self {
            contracts: vec![
                PlannedContract {
                    name: FLOW_NFT_DESCRIPTOR.to_string(),
                    args: Vec::new(),
                },
                PlannedContract {
                    name: SABLIER_FLOW.to_string(),
                    args: vec![
                        ArgSource::Admin,
                        ArgSource::DeployedAddress(FLOW_NFT_DESCRIPTOR.to_string()),
                    ],
                },
            ],
        }
    }

    pub fn contracts(&self) -> &[PlannedContract] {
        &self.contracts
    }

    /// Contract names in deployment order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(|c| c.name.as_str())
    }

    /// Turn `entry`'s argument sources into concrete values using the records
    /// produced so far.
    pub fn resolve_args(
        &self,
        entry: &PlannedContract,
        admin: Address,
        deployed: &[DeploymentRecord],
    ) -> DeployResult<Vec<ConstructorArg>> {
        entry
            .args
            .iter()
            .map(|source| match source {
                ArgSource::Admin => Ok(ConstructorArg::Address(admin)),
                ArgSource::Literal(value) => Ok(value.clone()),
                ArgSource::DeployedAddress(dep) => deployed
                    .iter()
                    .find(|r| &r.contract_name == dep)
                    .map(|r| ConstructorArg::Address(r.deployed_address))
                    .ok_or_else(|| {
                        DeployError::Plan(format!(
                            "{} needs the address of {} which has not been deployed",
                            entry.name, dep
                        ))
                    }),
            })
            .collect()
    }

    /// Predict the records a run would produce when `deployer` sends one
    /// creation transaction per contract starting at `nonce`.
    pub fn predict(
        &self,
        admin: Address,
        deployer: Address,
        nonce: u64,
    ) -> DeployResult<Vec<DeploymentRecord>> {
        let mut records: Vec<DeploymentRecord> = Vec::with_capacity(self.contracts.len());
        for (offset, entry) in self.contracts.iter().enumerate() {
            let constructor_args = self.resolve_args(entry, admin, &records)?;
            let contract_nonce = nonce.checked_add(offset as u64).ok_or_else(|| {
                DeployError::Plan(format!("nonce {} leaves no room for {}", nonce, entry.name))
            })?;
            records.push(DeploymentRecord {
                contract_name: entry.name.clone(),
                constructor_args,
                deployed_address: deployer.create(contract_nonce),
                tx_hash: None,
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const ADMIN: Address = address!("D427d37B5F6d33f7D42C4125979361E011FFbfD9");
    const DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn test_sablier_flow_plan_order() {
        let plan = DeploymentPlan::sablier_flow();
        let names: Vec<&str> = plan.names().collect();
        assert_eq!(names, vec![FLOW_NFT_DESCRIPTOR, SABLIER_FLOW]);
        assert!(plan.contracts()[0].args.is_empty());
    }

    #[test]
    fn test_sablier_flow_plan_is_valid() {
        let plan = DeploymentPlan::sablier_flow();
        assert_eq!(DeploymentPlan::new(plan.contracts().to_vec()).unwrap(), plan);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let err = DeploymentPlan::new(vec![
            PlannedContract {
                name: "B".into(),
                args: vec![ArgSource::DeployedAddress("A".into())],
            },
            PlannedContract {
                name: "A".into(),
                args: vec![],
            },
        ])
        .unwrap_err();
        assert!(matches!(err, DeployError::Plan(_)));
    }

    #[test]
    fn test_self_reference_rejected() {
        let err = DeploymentPlan::new(vec![PlannedContract {
            name: "A".into(),
            args: vec![ArgSource::DeployedAddress("A".into())],
        }])
        .unwrap_err();
        assert!(err.to_string().contains("not deployed before"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let entry = PlannedContract {
            name: "A".into(),
            args: vec![],
        };
        assert!(DeploymentPlan::new(vec![entry.clone(), entry]).is_err());
    }

    #[test]
    fn test_resolve_args_without_dependency_fails() {
        let plan = DeploymentPlan::sablier_flow();
        let err = plan
            .resolve_args(&plan.contracts()[1], ADMIN, &[])
            .unwrap_err();
        assert!(err.to_string().contains(FLOW_NFT_DESCRIPTOR));
    }

    #[test]
    fn test_predicted_flow_takes_descriptor_address() {
        let plan = DeploymentPlan::sablier_flow();
        for nonce in [0u64, 1, 7, 1_000] {
            let records = plan.predict(ADMIN, DEPLOYER, nonce).unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].deployed_address, DEPLOYER.create(nonce));
            assert!(records[0].constructor_args.is_empty());
            assert_eq!(
                records[1].constructor_args,
                vec![
                    ConstructorArg::Address(ADMIN),
                    ConstructorArg::Address(records[0].deployed_address),
                ]
            );
            assert_eq!(records[1].deployed_address, DEPLOYER.create(nonce + 1));
        }
    }

    #[test]
    fn test_predict_rejects_nonce_overflow() {
        let plan = DeploymentPlan::sablier_flow();
        let err = plan.predict(ADMIN, DEPLOYER, u64::MAX).unwrap_err();
        assert!(matches!(err, DeployError::Plan(ref msg) if msg.contains(SABLIER_FLOW)));
        assert!(plan.predict(ADMIN, DEPLOYER, u64::MAX - 1).is_ok());
    }

    #[test]
    fn test_literal_args_pass_through() {
        let plan = DeploymentPlan::new(vec![PlannedContract {
            name: "Token".into(),
            args: vec![ArgSource::Literal(ConstructorArg::String("FLOW".into()))],
        }])
        .unwrap();
        let args = plan.resolve_args(&plan.contracts()[0], ADMIN, &[]).unwrap();
        assert_eq!(args, vec![ConstructorArg::String("FLOW".into())]);
    }
}
