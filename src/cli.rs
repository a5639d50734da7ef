//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RunOverrides;

/// Config file read when `--config` is not given. Its absence is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "deploy.toml";

#[derive(Debug, Parser)]
#[command(name = "flow-deploy")]
#[command(about = "Deploy and verify FlowNFTDescriptor and SablierFlow", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file [default: deploy.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config path and whether the user asked for it explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deploy FlowNFTDescriptor, then SablierFlow, then verify both
    Deploy(DeployArgs),
    /// List known networks
    Networks,
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// Target network name
    #[arg(short, long)]
    pub network: String,

    /// Admin address passed to SablierFlow
    #[arg(long)]
    pub admin: Option<String>,

    /// Compiled artifacts directory
    #[arg(long)]
    pub artifacts: Option<String>,

    /// Seconds to wait before each verification request
    #[arg(long)]
    pub verify_delay_secs: Option<u64>,

    /// Do not submit verification requests
    #[arg(long)]
    pub skip_verify: bool,

    /// Print predicted addresses without sending transactions
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl DeployArgs {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            admin: self.admin.clone(),
            artifacts_dir: self.artifacts.clone(),
            verify_delay_secs: self.verify_delay_secs,
            skip_verify: self.skip_verify,
        }
    }
}
