//! Configuration management for finctl.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (FINCTL_*)
//! 2. Config file (<data_dir>/config.toml)
//! 3. Default values

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Finance API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Terminal output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the finance REST API
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for finctl data (session file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows per page for list commands
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

// Default value functions
fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "finctl", "finctl") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".finctl")
    }
}

fn default_page_size() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Override file values with `FINCTL_*` variables.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("FINCTL_API_URL").filter(|u| !u.is_empty()) {
            self.api.url = url;
        }
        if let Some(dir) = var("FINCTL_DATA_DIR").filter(|d| !d.is_empty()) {
            self.paths.data_dir = PathBuf::from(dir);
        }
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("FINCTL_CONFIG") {
            PathBuf::from(path)
        } else {
            std::env::var("FINCTL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir())
                .join("config.toml")
        }
    }

    /// File holding the persisted session.
    pub fn session_path(&self) -> PathBuf {
        self.paths.data_dir.join("session.json")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.paths.data_dir)
            .context("Failed to create data directory")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.session_path().ends_with("session.json"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
url = "https://finance.example.com/api"

[display]
page_size = 25
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.api.url, "https://finance.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.display.page_size, 25);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nurl = ").unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("FINCTL_API_URL", "http://10.0.0.5:8080/api"),
            ("FINCTL_DATA_DIR", "/tmp/finctl-test"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.url, "http://10.0.0.5:8080/api");
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/finctl-test/session.json")
        );
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new()));

        assert_eq!(config.api.url, default_api_url());
    }
}
