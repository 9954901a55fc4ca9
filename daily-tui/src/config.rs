use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `api_url` (also read from `.env`).
pub const API_URL_ENV: &str = "DAILY_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Base URL of the task backend, e.g. "http://localhost:8000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Where local data (OKRs, log file) lives. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            data_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl TasksConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("daily-tui")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// `--api-url` beats the environment, which beats the file.
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        pick_api_url(cli_override, from_env.as_deref(), &self.api_url)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .context("Cannot determine data directory")?
                .join("daily-tui")),
        }
    }
}

fn pick_api_url(cli: Option<&str>, env: Option<&str>, file: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(file)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = TasksConfig::parse("").unwrap();
        assert_eq!(config, TasksConfig::default());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn parses_all_fields() {
        let config = TasksConfig::parse(
            r#"
api_url = "http://tasks.internal:9000"
data_dir = "/tmp/daily"
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "http://tasks.internal:9000");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/daily")));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/daily"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn api_url_precedence() {
        assert_eq!(pick_api_url(Some("http://cli"), Some("http://env"), "http://file"), "http://cli");
        assert_eq!(pick_api_url(None, Some("http://env"), "http://file"), "http://env");
        assert_eq!(pick_api_url(Some("  "), None, "http://file"), "http://file");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&TasksConfig::default()).unwrap();
        assert!(!raw.contains("data_dir"));
        assert_eq!(TasksConfig::parse(&raw).unwrap(), TasksConfig::default());
    }
}
