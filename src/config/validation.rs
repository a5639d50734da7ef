//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, chain IDs and the admin address format
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use alloy::primitives::Address;

use crate::config::schema::{DeployConfig, ExplorerConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(admin) = &config.deployment.admin {
        if admin.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "deployment.admin",
                format!("'{}' is not a valid address", admin),
            ));
        }
    }

    if config.deployment.private_key_env.trim().is_empty() {
        errors.push(ValidationError::new(
            "deployment.private_key_env",
            "must name an environment variable",
        ));
    }

    if config.deployment.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "deployment.receipt_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.verification.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "verification.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.artifacts.dir.trim().is_empty() {
        errors.push(ValidationError::new("artifacts.dir", "must not be empty"));
    }

    for (name, entry) in &config.networks {
        let prefix = format!("networks.{}", name);

        if entry.chain_id == 0 {
            errors.push(ValidationError::new(
                format!("{}.chain_id", prefix),
                "must be non-zero",
            ));
        }

        check_url(&mut errors, &format!("{}.rpc_url", prefix), &entry.rpc_url);

        if let Some(explorer) = &entry.explorer {
            check_explorer(&mut errors, &format!("{}.explorer", prefix), explorer);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_explorer(errors: &mut Vec<ValidationError>, prefix: &str, explorer: &ExplorerConfig) {
    check_url(errors, &format!("{}.api_url", prefix), &explorer.api_url);
    check_url(errors, &format!("{}.browser_url", prefix), &explorer.browser_url);
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
        return;
    }
    if let Err(e) = value.parse::<url::Url>() {
        errors.push(ValidationError::new(
            field,
            format!("invalid URL '{}': {}", value, e),
        ));
    }
}
