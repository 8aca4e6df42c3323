//! Builder configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Optional TOML file passed by the caller
//! 3. Environment variables: `LOCTREE_*` prefix

use std::path::Path;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "LOCTREE";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment override: {0}")]
    Env(#[from] ConfigError),
}

/// Options for [`TreeBuilder`](crate::domain::TreeBuilder).
///
/// The defaults keep every item exactly as given and place no limit on depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Strip surrounding whitespace from each value
    pub trim_values: bool,
    /// Deepest accepted depth; deeper items are malformed input
    pub max_depth: Option<usize>,
}

/// Raw config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawBuilderConfig {
    trim_values: Option<bool>,
    max_depth: Option<usize>,
}

impl BuilderConfig {
    /// Parse a complete config from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings with layered precedence using the `LOCTREE_` prefix.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_prefix(file, ENV_PREFIX)
    }

    #[instrument(level = "debug")]
    pub fn load_with_prefix(file: Option<&Path>, prefix: &str) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(path) = file {
            let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.display().to_string(),
                source,
            })?;
            let raw: RawBuilderConfig = toml::from_str(&content)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current, prefix)?;
        debug!(?current, "builder config loaded");
        Ok(current)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawBuilderConfig) -> Self {
        Self {
            trim_values: overlay.trim_values.unwrap_or(self.trim_values),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }

    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        if let Some(val) = env_value(config.get_bool("trim_values"))? {
            settings.trim_values = val;
        }
        if let Some(val) = env_value(config.get::<usize>("max_depth"))? {
            settings.max_depth = Some(val);
        }

        Ok(settings)
    }
}

/// Unset variables are `None`; values that do not convert are errors.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, SettingsError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(SettingsError::Env(e)),
    }
}
