use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::model::Units;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["WEATHER_NOW_API_KEY", "OPENWEATHER_API_KEY"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// default_city = "Lisbon"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Units,
    pub base_url: Option<String>,
    /// City looked up once when the interactive prompt starts.
    pub default_city: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-now", "weather-now")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the API key with the first non-empty value found in
    /// [`API_KEY_ENV_VARS`], looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()));

        if let Some(key) = from_env {
            self.api_key = Some(key);
        }
    }

    /// API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
    }

    /// Request timeout; `0` means "not set" rather than "expire immediately".
    pub fn timeout(&self) -> Duration {
        let secs = self.timeout_secs.filter(|s| *s > 0).unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn default_city(&self) -> Option<&str> {
        self.default_city.as_deref().filter(|c| !c.trim().is_empty())
    }
}
