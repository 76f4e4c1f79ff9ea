//! Configuration file handling.
//!
//! Reads from `~/.config/kpassign/kpassign.toml`

use anyhow::{Context, Result};
use kpassign_core::MissingEntry;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exit with an error instead of saving when no entry has the title.
    pub abort_on_missing_entry: bool,
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path and fail if it is
    /// missing. Otherwise use the default location, falling back to defaults
    /// when there is no file there.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path.or_else(Self::config_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            if is_custom {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::debug!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    pub fn missing_entry_policy(&self) -> MissingEntry {
        if self.abort_on_missing_entry {
            MissingEntry::Abort
        } else {
            MissingEntry::Continue
        }
    }

    /// Get the path to the config file.
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kpassign").join("kpassign.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpassign.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_file_uses_defaults() {
        let (_dir, path) = write_config("");
        let config = Config::load(Some(path)).unwrap();
        assert!(!config.abort_on_missing_entry);
        assert_eq!(config.missing_entry_policy(), MissingEntry::Continue);
    }

    #[test]
    fn abort_on_missing_entry() {
        let (_dir, path) = write_config("abort_on_missing_entry = true\n");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.missing_entry_policy(), MissingEntry::Abort);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("abort_on_missing = true\n");
        assert!(Config::load(Some(path)).is_err());
    }

    #[test]
    fn missing_custom_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
