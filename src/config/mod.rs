//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → networks.rs (merge over built-in presets)
//!     → resolver.rs (CLI overrides + env: admin, private key, API key)
//!     → ResolvedRun (immutable for the rest of the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Every precondition is checked here, before any RPC call

pub mod loader;
pub mod networks;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use networks::NetworkConfig;
pub use resolver::{resolve, ResolvedRun, RunOverrides};
pub use schema::DeployConfig;
pub use schema::{ExplorerConfig, ExplorerKind, NetworkEntry};
