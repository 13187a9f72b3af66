use crate::naming::NamingConvention;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compiler configuration. Every field has a default, so a settings file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Convention used by `compile_default` and `compile_for`.
    pub default_naming: NamingConvention,
    pub predicate_cache: PredicateCacheSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateCacheSettings {
    pub enabled: bool,
    /// Idle time after which a cached predicate is evicted.
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for PredicateCacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            sweep_interval_secs: 300,
        }
    }
}

impl CompilerSettings {
    pub fn from_json_str(source: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source)
    }
}
