//! Standard-JSON compiler input submitted with each verification.

use std::path::Path;
use std::sync::Arc;

use crate::artifacts::{load_build_info, ArtifactStore, BuildInfo};
use crate::verify::types::{VerificationRequest, VerifyError, VerifyResult};

/// Where a request's compiler input comes from.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// One build-info file shared by every contract.
    File(Arc<BuildInfo>),
    /// The build-info in the artifact output that compiled the contract.
    Discover(ArtifactStore),
}

impl SourceInput {
    /// Use `configured` when given and readable, otherwise search `store`.
    pub fn new(configured: Option<&str>, store: ArtifactStore) -> Self {
        let Some(path) = configured else {
            return SourceInput::Discover(store);
        };
        match load_build_info(Path::new(path)) {
            Ok(info) => SourceInput::File(Arc::new(info)),
            Err(e) => {
                tracing::warn!(error = %e, "Configured build-info unusable, searching artifacts instead");
                SourceInput::Discover(store)
            }
        }
    }

    /// Compiler input for one request.
    pub fn resolve(&self, request: &VerificationRequest) -> VerifyResult<Arc<BuildInfo>> {
        match self {
            SourceInput::File(info) => Ok(Arc::clone(info)),
            SourceInput::Discover(store) => store
                .find_build_info(request.source_path.as_deref())
                .map(Arc::new)
                .ok_or_else(|| {
                    VerifyError::MissingSource(format!(
                        "no build-info in {} compiles {} (build with --build-info or set verification.build_info)",
                        store.build_info_dir().display(),
                        request.fully_qualified_name
                    ))
                }),
        }
    }
}
