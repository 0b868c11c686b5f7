use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::resolver::{DEFAULT_PASS_COUNT, ipify, ipvigilante, open_notify};

/// Upstream endpoint URLs. Overridable because the upstreams are black
/// boxes that occasionally move, and so a host can point the pipeline at a
/// staging server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_ip_echo")]
    pub ip_echo: String,
    #[serde(default = "default_geolocation")]
    pub geolocation: String,
    #[serde(default = "default_pass_times")]
    pub pass_times: String,
}

fn default_ip_echo() -> String {
    ipify::DEFAULT_ENDPOINT.to_string()
}

fn default_geolocation() -> String {
    ipvigilante::DEFAULT_ENDPOINT.to_string()
}

fn default_pass_times() -> String {
    open_notify::DEFAULT_ENDPOINT.to_string()
}

fn default_count() -> u32 {
    DEFAULT_PASS_COUNT
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_echo: default_ip_echo(),
            geolocation: default_geolocation(),
            pass_times: default_pass_times(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_count = 3
///
/// [endpoints]
/// pass_times = "http://localhost:8080/iss-pass.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Passes requested per report when the CLI gives no count.
    #[serde(default = "default_count")]
    pub default_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            default_count: default_count(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "iss-tracker", "iss-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
