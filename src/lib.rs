//! flow-deployer: deploys FlowNFTDescriptor and SablierFlow to an
//! EVM-compatible network and verifies them on its block explorer.

pub mod artifacts;
pub mod blockchain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod observability;
pub mod verify;

pub use config::schema::DeployConfig;
pub use deploy::{DeployError, DeploymentPlan, DeploymentReport, DeploymentRunner};
