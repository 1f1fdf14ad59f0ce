//! # Configuration
//!
//! Shadow configuration is managed by [`confique`], which handles layered loading
//! from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ATTRSHADOW_MAX_VALUE_LEN`.
//! 2. **Config file**: `attrshadow.toml` in the OS config directory (via `directories`),
//!    or an explicit path given to [`ShadowConfig::load_from`].
//! 3. **Compiled defaults**: no value length limit.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_value_len` | unset | Maximum value length in bytes accepted by `set` |

use crate::error::{AttrError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "attrshadow.toml";

/// Configuration for an attribute shadow, stored in `attrshadow.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowConfig {
    /// Maximum value length in bytes. When absent, `set` accepts any length
    /// and only the backend may reject a value.
    #[config(env = "ATTRSHADOW_MAX_VALUE_LEN")]
    pub max_value_len: Option<usize>,
}

impl ShadowConfig {
    pub fn with_max_value_len(mut self, max: usize) -> Self {
        self.max_value_len = Some(max);
        self
    }

    /// Load from `path` with environment overrides. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| AttrError::Config(e.to_string()))
    }

    /// Load from the default location, or from the environment alone when
    /// no config directory can be determined.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::builder()
                .env()
                .load()
                .map_err(|e| AttrError::Config(e.to_string())),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "attrshadow", "attrshadow")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_has_no_limit() {
        let config = ShadowConfig::default();
        assert_eq!(config.max_value_len, None);
    }

    #[test]
    fn test_with_max_value_len() {
        let config = ShadowConfig::default().with_max_value_len(255);
        assert_eq!(config.max_value_len, Some(255));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_value_len = 64\n").unwrap();

        let config = ShadowConfig::load_from(&path).unwrap();
        assert_eq!(config.max_value_len, Some(64));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ShadowConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ShadowConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_value_len = \"lots\"\n").unwrap();

        let err = ShadowConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, AttrError::Config(_)));
    }

    #[test]
    fn test_default_path_uses_config_file_name() {
        if let Some(path) = ShadowConfig::default_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
        }
    }
}
