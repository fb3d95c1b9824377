//! Configuration loading and config file resolution
//!
//! The engine's tunables are the four tier thresholds and the field taxonomy.
//! Both are read once from an optional TOML file and then fixed for the
//! lifetime of the engine.
//!
//! # Config File Priority
//!
//! 1. Explicit path (command-line `--config`)
//! 2. Environment variable `PROFQ_CONFIG`
//! 3. `<user config dir>/profq/config.toml`
//! 4. Compiled defaults
//!
//! An explicit or environment-supplied path must exist. The per-user file is
//! optional; when absent the compiled defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::taxonomy::FieldTaxonomy;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "PROFQ_CONFIG";

/// Tier thresholds, compared with `score >=` from the top down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    #[serde(default = "default_excellent")]
    pub excellent: f64,
    #[serde(default = "default_good")]
    pub good: f64,
    #[serde(default = "default_acceptable")]
    pub acceptable: f64,
    #[serde(default = "default_poor")]
    pub poor: f64,
}

fn default_excellent() -> f64 {
    0.9
}

fn default_good() -> f64 {
    0.7
}

fn default_acceptable() -> f64 {
    0.5
}

fn default_poor() -> f64 {
    0.3
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: default_excellent(),
            good: default_good(),
            acceptable: default_acceptable(),
            poor: default_poor(),
        }
    }
}

impl QualityThresholds {
    /// Thresholds must lie in [0, 1] and be strictly descending
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("excellent", self.excellent),
            ("good", self.good),
            ("acceptable", self.acceptable),
            ("poor", self.poor),
        ];

        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidThresholds(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        for pair in named.windows(2) {
            let (upper_name, upper) = pair[0];
            let (lower_name, lower) = pair[1];
            if upper <= lower {
                return Err(Error::InvalidThresholds(format!(
                    "{} ({}) must be greater than {} ({})",
                    upper_name, upper, lower_name, lower
                )));
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Bootstrap configuration as read from TOML
///
/// Every section is optional; omitted sections take compiled defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub thresholds: QualityThresholds,

    #[serde(default)]
    pub taxonomy: FieldTaxonomy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn from_toml(input: &str, origin: &Path) -> Result<Self> {
        let config: TomlConfig = toml::from_str(input).map_err(|e| Error::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.taxonomy.validate()
    }

    /// Engine-facing part of the configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            thresholds: self.thresholds,
            taxonomy: self.taxonomy.clone(),
        }
    }
}

/// Immutable engine configuration
///
/// Injected at engine construction; the engine never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub thresholds: QualityThresholds,
    pub taxonomy: FieldTaxonomy,
}

impl EngineConfig {
    pub fn new(thresholds: QualityThresholds, taxonomy: FieldTaxonomy) -> Result<Self> {
        thresholds.validate()?;
        taxonomy.validate()?;
        Ok(Self {
            thresholds,
            taxonomy,
        })
    }
}

/// Locate the config file following the priority order in the module docs
///
/// Returns `None` when no explicit path is given and the per-user file does
/// not exist, meaning compiled defaults should be used.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Result<Option<PathBuf>> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return require_existing(path.to_path_buf(), "command line");
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return require_existing(PathBuf::from(path), CONFIG_ENV_VAR);
        }
    }

    // Priority 3: Per-user config file
    if let Some(path) = default_config_path() {
        if path.exists() {
            return Ok(Some(path));
        }
    }

    // Priority 4: Compiled defaults
    Ok(None)
}

fn require_existing(path: PathBuf, origin: &str) -> Result<Option<PathBuf>> {
    if path.exists() {
        Ok(Some(path))
    } else {
        Err(Error::Config(format!(
            "Config file from {} not found: {}",
            origin,
            path.display()
        )))
    }
}

/// Per-user config file location (`~/.config/profq/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("profq").join("config.toml"))
}

/// Resolve and load configuration, degrading to defaults when no file exists
///
/// A per-user file that exists but fails to parse is reported and replaced by
/// defaults; explicitly requested files must parse.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_arg.is_some()
        || std::env::var(CONFIG_ENV_VAR).map_or(false, |path| !path.is_empty());

    match resolve_config_path(cli_arg)? {
        Some(path) => match TomlConfig::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(e) if !explicit => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable config file, using defaults"
                );
                Ok(TomlConfig::default())
            }
            Err(e) => Err(e),
        },
        None => Ok(TomlConfig::default()),
    }
}
