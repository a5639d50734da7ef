//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading, CREATE address prediction)
//!     → client.rs (signing provider, chain check, creation txs)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - Read-only RPC calls have configurable timeouts

pub mod client;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use types::{BlockchainError, ChainId, CreationReceipt};
pub use wallet::Wallet;
