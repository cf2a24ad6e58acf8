//! Configuration
//!
//! Loaded from YAML, then overlaid with environment variables:
//! - `ORGCHART_DIRECTORY`: snapshot file path
//! - `ORGCHART_LOG`: log level / filter directive
//!
//! ```yaml
//! directory:
//!   path: ./employees.json
//!   format: json
//! hierarchy:
//!   report_cycles: true
//! logging:
//!   level: debug
//! ```

use crate::directory::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DIRECTORY: &str = "ORGCHART_DIRECTORY";
pub const ENV_LOG: &str = "ORGCHART_LOG";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgChartConfig {
    pub directory: DirectoryConfig,
    pub hierarchy: HierarchyConfig,
    pub logging: LoggingConfig,
}

/// Where directory snapshots come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub path: Option<PathBuf>,
    /// Overrides extension-based detection
    pub format: Option<SnapshotFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Log manager cycles found in each refreshed snapshot
    pub report_cycles: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            report_cycles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "orgchart=debug"
    pub level: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

impl OrgChartConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: OrgChartConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Overlay `ORGCHART_DIRECTORY` and `ORGCHART_LOG` from the process environment.
    pub fn apply_env(self) -> ConfigResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from any key lookup (the process environment in production).
    pub fn apply_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DIRECTORY).filter(|p| !p.is_empty()) {
            self.directory.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}
