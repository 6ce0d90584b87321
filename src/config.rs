//! Aggregator configuration
//!
//! Loaded from YAML. Every field has a default, so an empty or missing file
//! yields a working configuration.

use crate::aggregate::DEFAULT_UNRESOLVED_PATTERN;
use crate::source::{BOOKMARKS_SOURCE, WORKING_SET_SOURCE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MOSAIC_CONFIG";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid unresolved-label pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A source read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    pub id: String,
    pub path: PathBuf,
}

/// Configuration for an [`Aggregator`](crate::Aggregator) session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    /// Source whose records win deduplication
    pub privileged_source: String,
    /// Source enabled when no toggle state has been persisted
    pub default_enabled_source: String,
    /// Key under which the enabled-source set is persisted
    pub toggle_key: String,
    /// Labels matching this pattern are treated as unresolved ids
    pub unresolved_label_pattern: String,
    /// Side length of the square new nodes are scattered into
    pub layout_spread: f64,
    /// Radius used by ego-network extraction when none is given
    pub default_ego_hops: usize,
    /// File-backed sources registered by the CLI
    pub sources: Vec<FileSourceConfig>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            privileged_source: WORKING_SET_SOURCE.to_string(),
            default_enabled_source: BOOKMARKS_SOURCE.to_string(),
            toggle_key: "mosaic.enabled-sources".to_string(),
            unresolved_label_pattern: DEFAULT_UNRESOLVED_PATTERN.to_string(),
            layout_spread: 1000.0,
            default_ego_hops: 2,
            sources: Vec::new(),
        }
    }
}

impl MosaicConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. Relative source paths resolve against the file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&raw)?;
        if let Some(base) = path.parent() {
            for source in &mut config.sources {
                if source.path.is_relative() {
                    source.path = base.join(&source.path);
                }
            }
        }
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load from an explicit path, else from `MOSAIC_CONFIG`, else defaults
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "config file not found; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        regex_lite::Regex::new(&self.unresolved_label_pattern)?;
        Ok(())
    }
}
