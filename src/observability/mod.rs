//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Each run is wrapped in a span carrying run_id, network and chain_id.
//! ```

pub mod logging;

pub use logging::init_logging;
