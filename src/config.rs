use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the country list is served from unless configured otherwise
pub const DEFAULT_SOURCE_URL: &str = "https://gist.githubusercontent.com/peymano-wmt/32dcb892b06648910ddd40406e37fdab/raw/db25946fd77c5873b0303b858e861ce724e0dcd0/countries.json";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Remote data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the JSON country list
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// List rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the region next to each country name
    #[serde(default = "default_true")]
    pub show_region: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_region: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Get the directory holding config and shell history
    fn project_dirs() -> Result<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "countries", "Countries")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Get the shell history file path
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("shell_history"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Read a setting by dotted key, e.g. `source.url`
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["source", "url"] => Ok(self.source.url.clone()),
            ["source", "timeout_secs"] => Ok(self.source.timeout_secs.to_string()),
            ["display", "show_region"] => Ok(self.display.show_region.to_string()),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
    }

    /// Change a setting by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["source", "url"] => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("Source URL must start with http:// or https://");
                }
                self.source.url = value.to_string();
            }
            ["source", "timeout_secs"] => {
                let secs: u64 = value.parse()?;
                if secs == 0 {
                    anyhow::bail!("Timeout must be at least one second");
                }
                self.source.timeout_secs = secs;
            }
            ["display", "show_region"] => {
                self.display.show_region = value.parse()?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}
