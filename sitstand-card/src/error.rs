//! Card adapter errors

use std::path::PathBuf;

use sitstand_core::ConfigError;
use thiserror::Error;

/// Errors surfaced by the card adapter
#[derive(Debug, Error)]
pub enum CardError {
    /// Configuration failed validation
    #[error("invalid card configuration: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file is not valid TOML for a card
    #[error("failed to parse card configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading a file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in a trace file
    #[error("trace line {line}: {reason}")]
    Trace { line: usize, reason: &'static str },
}
