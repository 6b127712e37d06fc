//! # Registry Telemetry
//!
//! Structured logging for processes embedding the registry client.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REGISTRY_SERVICE_NAME` | `registry-client` | Service name in logs |
//! | `REGISTRY_LOG_LEVEL` | `info` | Filter directive (falls back to `RUST_LOG`) |
//! | `REGISTRY_JSON_LOGS` | `false` | JSON lines output |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}
