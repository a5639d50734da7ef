//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DeployConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("No admin address configured; pass --admin or set deployment.admin")]
    MissingAdmin,

    #[error("Invalid admin address '{0}'")]
    InvalidAdmin(String),

    #[error("Environment variable {0} not set")]
    MissingEnv(String),

    #[error(transparent)]
    Wallet(#[from] crate::blockchain::BlockchainError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&content)
}

/// Parse and validate configuration from TOML text.
pub fn load_config_str(content: &str) -> Result<DeployConfig, ConfigError> {
    let config: DeployConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the config at `path`, falling back to defaults when the file is absent
/// and `required` is false.
pub fn load_or_default(path: &Path, required: bool) -> Result<DeployConfig, ConfigError> {
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config file found, using presets");
        return Ok(DeployConfig::default());
    }
    load_config(path)
}
