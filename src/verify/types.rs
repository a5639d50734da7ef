//! Verification request/outcome types and error definitions.

use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use serde::Serialize;
use thiserror::Error;

use crate::artifacts::ContractArtifact;
use crate::deploy::args::{encode_args, ConstructorArg};
use crate::deploy::types::DeploymentRecord;

/// Errors from an explorer. Never fatal to a run.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Explorer rejected verification: {0}")]
    Rejected(String),

    #[error("Missing verification input: {0}")]
    MissingSource(String),

    #[error("Verification failed: {0}")]
    Failed(String),
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// HTTP client shared by the explorer verifiers. Every request is bounded by `timeout`.
pub(crate) fn http_client(timeout: Duration) -> VerifyResult<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// One verification submission, derived from a deployment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub contract_name: String,
    /// `path:Name` when the source path is known.
    pub fully_qualified_name: String,
    /// Source file the contract is defined in, when the artifact records it.
    pub source_path: Option<String>,
    pub address: Address,
    pub constructor_args: Vec<ConstructorArg>,
    /// ABI-encoded constructor arguments.
    pub encoded_args: Bytes,
    /// Compiler version recorded in the artifact, if any.
    pub compiler_version: Option<String>,
}

impl VerificationRequest {
    pub fn new(record: &DeploymentRecord, artifact: &ContractArtifact) -> Self {
        Self {
            contract_name: record.contract_name.clone(),
            fully_qualified_name: artifact.fully_qualified_name(),
            source_path: artifact.source_path.clone(),
            address: record.deployed_address,
            constructor_args: record.constructor_args.clone(),
            encoded_args: encode_args(&record.constructor_args),
            compiler_version: artifact.compiler_version.clone(),
        }
    }
}

/// What the explorer said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    AlreadyVerified,
    /// Accepted but not confirmed within the polling budget.
    Submitted { reference: String },
    Failed { reason: String },
    Skipped { reason: String },
}

impl VerificationStatus {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Verified | VerificationStatus::AlreadyVerified
        )
    }
}

/// Verification result for one deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub contract_name: String,
    pub address: Address,
    #[serde(flatten)]
    pub status: VerificationStatus,
}
