//! flow-deploy
//!
//! ```text
//!   config resolver ──▶ deploy FlowNFTDescriptor ──▶ deploy SablierFlow(admin, descriptor)
//!                                                          │
//!          report ◀── verify SablierFlow ◀── verify FlowNFTDescriptor
//! ```
//!
//! Exit code 1 on any precondition or deployment failure. Verification
//! failures are logged and do not change the exit code.

use std::process::ExitCode;

use clap::Parser;

use flow_deployer::cli::{Cli, Commands};
use flow_deployer::commands;
use flow_deployer::config::loader::load_or_default;
use flow_deployer::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env is optional
    let _ = dotenv::dotenv();

    let (config_path, required) = cli.config_path();
    let config = match load_or_default(&config_path, required) {
        Ok(config) => config,
        Err(e) => {
            init_logging(cli.log_level.as_deref().unwrap_or("info"));
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&level);

    tracing::info!("flow-deploy v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Networks => {
            for line in commands::networks(&config) {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Commands::Deploy(args) => {
            match commands::deploy(&config, &args, |k| std::env::var(k).ok()).await {
                Ok(report) => {
                    if args.json {
                        match report.to_json() {
                            Ok(json) => println!("{}", json),
                            Err(e) => tracing::error!(error = %e, "Failed to render report"),
                        }
                    } else {
                        report.print();
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!(error = %e, "Deployment aborted");
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
