//! Deployment subsystem.
//!
//! # Data Flow
//! ```text
//! DeploymentPlan (ordered contracts, argument sources)
//!     → runner.rs (resolve args from earlier records, deploy in order)
//!     → deployer.rs (creation code = bytecode ++ abi(args), send, await receipt)
//!     → DeploymentRecord per contract
//!     → verify subsystem (once per record)
//!     → report.rs
//! ```

pub mod args;
pub mod deployer;
pub mod plan;
pub mod report;
pub mod runner;
pub mod types;

pub use args::ConstructorArg;
pub use deployer::ContractDeployer;
pub use plan::{ArgSource, DeploymentPlan, PlannedContract, FLOW_NFT_DESCRIPTOR, SABLIER_FLOW};
pub use report::DeploymentReport;
pub use runner::{load_plan_artifacts, ArtifactSet, DeploymentRunner, RunOutcome};
pub use types::{DeployError, DeploymentRecord};
