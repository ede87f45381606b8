use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "SSHCFG_HOME";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ssh_file_config: Option<PathBuf>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ssh_file_config: None,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Path of the SSH config file to manage. An explicit path (CLI flag or
    /// env) wins over the settings file, which wins over `~/.ssh/config`.
    pub fn resolve_ssh_config(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.ssh_file_config {
            return Ok(path.clone());
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".ssh").join("config"))
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config_file: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .context("Could not find config directory")?
                .join("sshcfg"),
        };

        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: impl AsRef<Path>) -> Self {
        Self {
            config_file: config_dir.as_ref().join("sshcfg.toml"),
        }
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_file
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        // No settings file means defaults; it is never created implicitly
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content: String =
            fs::read_to_string(&self.config_file).context("Failed to read config file")?;

        let config: AppConfig =
            toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}
