//! CLI command implementations.

pub mod checkout;
pub mod fixtures;

use sofa_checkout::{CheckoutError, ConfigError, TransportError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Gateway configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be created.
    #[error("Transport setup error: {0}")]
    Transport(#[from] TransportError),

    /// A checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A fixture file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A JSON fixture file did not parse.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// A YAML fixture file did not parse.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    /// The fixture file extension is not `.json`, `.yaml` or `.yml`.
    #[error("Unsupported fixture format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// Result could not be printed.
    #[error("Failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}
