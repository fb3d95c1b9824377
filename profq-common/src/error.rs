//! Common error types for profq

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for profq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating configuration
///
/// The scoring and reconciliation core never returns these; they only
/// surface where configuration enters the system.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be located
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse / deserialization error
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Tier thresholds out of range or not strictly descending
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// Field taxonomy empty or containing duplicates
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}
