//! Configuration management for the playground

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured data source
pub const DATA_ENV: &str = "PLAYGROUND_DATA";

/// Playground configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where project data is fetched from (http(s) URL, file:// URL or path)
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Play the boot animation on startup
    #[serde(default = "default_boot_animation")]
    pub boot_animation: bool,

    /// UI tick in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_data_source() -> String {
    "data/projects.json".to_string()
}

fn default_boot_animation() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            boot_animation: default_boot_animation(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the environment override for the data source, if set
    pub fn with_env(mut self) -> Self {
        if let Ok(source) = std::env::var(DATA_ENV) {
            if !source.trim().is_empty() {
                self.data_source = source;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_source, "data/projects.json");
        assert!(config.boot_animation);
        assert_eq!(config.tick_rate_ms, 50);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "boot_animation": false }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.boot_animation);
        assert_eq!(config.data_source, "data/projects.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_source: "https://example.com/projects.json".to_string(),
            boot_animation: false,
            tick_rate_ms: 16,
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Config::load(&path).is_err());
    }

    // The only test in this crate that touches the process environment
    #[test]
    fn test_env_overrides_file_unless_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_source": "from-file.json" }"#).unwrap();

        std::env::set_var(DATA_ENV, "https://env.example/projects.json");
        let from_env = Config::load(&path).unwrap().with_env();

        std::env::set_var(DATA_ENV, "   ");
        let blank = Config::load(&path).unwrap().with_env();

        std::env::remove_var(DATA_ENV);
        let unset = Config::load(&path).unwrap().with_env();

        assert_eq!(from_env.data_source, "https://env.example/projects.json");
        assert_eq!(blank.data_source, "from-file.json");
        assert_eq!(unset.data_source, "from-file.json");
    }
}
