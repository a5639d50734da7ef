//! Compiled contract artifacts.
//!
//! Reads Foundry (`out/`) or Hardhat (`artifacts/`) output: creation bytecode
//! for deployment, plus source path and compiler version for verification.

pub mod store;
pub mod types;

pub use store::{load_build_info, ArtifactStore};
pub use types::{ArtifactError, BuildInfo, ContractArtifact};
