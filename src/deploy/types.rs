//! Deployment records and error definitions.

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use thiserror::Error;

use crate::artifacts::ArtifactError;
use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::deploy::args::ConstructorArg;

/// Fatal errors: any of these aborts the run.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("Invalid deployment plan: {0}")]
    Plan(String),

    #[error(
        "Network {0} is a ZK Stack chain: it needs zksolc bytecode and an EIP-712 deployment, \
         which flow-deploy does not send. Set zksync = false on the network entry only if \
         the chain accepts plain EVM creation transactions"
    )]
    ZkStackNetwork(String),

    #[error("Deployment of {contract} failed: {source}")]
    Failed {
        contract: String,
        source: BlockchainError,
    },
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// A contract that has been deployed during this run. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub constructor_args: Vec<ConstructorArg>,
    pub deployed_address: Address,
    /// Creation transaction; absent for predicted (dry-run) records.
    pub tx_hash: Option<TxHash>,
}
