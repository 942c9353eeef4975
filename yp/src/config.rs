//! Application configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// yp application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the account store API
    pub base_url: String,

    /// Directory backing local storage
    pub storage_dir: PathBuf,

    /// Serve the slim system prompt rules instead of the full set
    pub use_slim_rules: bool,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Default log level (overridden by --log-level)
    pub log_level: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yprompt")
        .join("storage")
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_dir: default_storage_dir(),
            use_slim_rules: false,
            timeout_ms: default_timeout_ms(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .yprompt.yml
        let local_config = PathBuf::from(".yprompt.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/yprompt/yprompt.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("yprompt").join("yprompt.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(!config.use_slim_rules);
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("base_url: https://prompts.example.com\n").unwrap();
        assert_eq!(config.base_url, "https://prompts.example.com");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.storage_dir, default_storage_dir());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
