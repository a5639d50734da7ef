//! Block-explorer source verification.
//!
//! # Data Flow
//! ```text
//! DeploymentRecord + ContractArtifact
//!     → types.rs (VerificationRequest)
//!     → source.rs (build-info: configured file or found by source path)
//!     → etherscan.rs | zksync.rs (one submission, then status polling)
//!     → VerificationStatus
//! ```
//!
//! # Design Decisions
//! - Verification errors never abort a run; the runner downgrades them to
//!   `VerificationStatus::Failed`
//! - A request is submitted exactly once; only status checks repeat

pub mod etherscan;
pub mod source;
pub mod types;
pub mod zksync;

use std::time::Duration;

use crate::artifacts::ArtifactStore;
use crate::config::{ExplorerKind, ResolvedRun};

pub use etherscan::EtherscanVerifier;
pub use source::SourceInput;
pub use types::{VerificationOutcome, VerificationRequest, VerificationStatus, VerifyError, VerifyResult};
pub use zksync::ZksyncVerifier;

/// Something that can submit a verification request.
#[allow(async_fn_in_trait)]
pub trait SourceVerifier {
    async fn verify(&self, request: &VerificationRequest) -> VerifyResult<VerificationStatus>;
}

/// Verifier selected by the network's explorer kind.
#[derive(Debug, Clone)]
pub enum ExplorerVerifier {
    Etherscan(EtherscanVerifier),
    Zksync(ZksyncVerifier),
}

impl ExplorerVerifier {
    /// Build the verifier for a resolved run.
    ///
    /// Returns `None` when verification is disabled, the network has no
    /// explorer, or the HTTP client cannot be built. Compiler input comes from
    /// `verification.build_info` when set, otherwise from the build-info files
    /// next to the artifacts.
    pub fn for_run(run: &ResolvedRun) -> Option<Self> {
        if !run.verification.enabled {
            tracing::info!("Verification disabled");
            return None;
        }
        let Some(explorer) = run.network.explorer.as_ref() else {
            tracing::info!(network = %run.network.name, "No explorer configured, verification skipped");
            return None;
        };

        let source = SourceInput::new(
            run.verification.build_info.as_deref(),
            ArtifactStore::from_config(&run.artifacts),
        );
        let poll_attempts = run.verification.status_poll_attempts;
        let poll_interval = Duration::from_secs(run.verification.status_poll_interval_secs);
        let request_timeout = Duration::from_secs(run.verification.request_timeout_secs);

        let verifier = match explorer.kind {
            ExplorerKind::Etherscan => EtherscanVerifier::new(
                &explorer.api_url,
                run.explorer_api_key.clone(),
                source,
                poll_attempts,
                poll_interval,
                request_timeout,
            )
            .map(ExplorerVerifier::Etherscan),
            ExplorerKind::Zksync => ZksyncVerifier::new(
                &explorer.api_url,
                run.verification.zksolc_version.clone(),
                source,
                poll_attempts,
                poll_interval,
                request_timeout,
            )
            .map(ExplorerVerifier::Zksync),
        };

        match verifier {
            Ok(verifier) => Some(verifier),
            Err(e) => {
                tracing::error!(error = %e, "Could not build explorer client, verification skipped");
                None
            }
        }
    }

    /// Endpoint requests are sent to.
    pub fn api_url(&self) -> &str {
        match self {
            ExplorerVerifier::Etherscan(v) => v.api_url(),
            ExplorerVerifier::Zksync(v) => v.api_url(),
        }
    }
}

impl SourceVerifier for ExplorerVerifier {
    async fn verify(&self, request: &VerificationRequest) -> VerifyResult<VerificationStatus> {
        match self {
            ExplorerVerifier::Etherscan(v) => v.verify(request).await,
            ExplorerVerifier::Zksync(v) => v.verify(request).await,
        }
    }
}
