//! # profq Common Library
//!
//! Shared code for the profq workspace:
//! - Error types for the configuration edge
//! - Field taxonomy and tier thresholds (the engine's only tunables)
//! - TOML configuration loading and path resolution
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod taxonomy;

pub use config::{EngineConfig, QualityThresholds, TomlConfig};
pub use error::{Error, Result};
pub use taxonomy::{FieldKind, FieldSpec, FieldTaxonomy, ProfileField};
