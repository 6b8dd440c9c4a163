use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_timeout_secs() -> u64 {
    30
}

fn default_event_limit() -> usize {
    3
}

/// Settings for the feed client and resolver.
/// Loaded from `config.toml` in the platform config dir; every field optional.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_event_limit")]
    pub event_limit: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            event_limit: default_event_limit(),
            user_agent: None,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        if let Some(proj) = ProjectDirs::from("com", "nextroom", "nextroom") {
            let config_dir = proj.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// Load the config file, falling back to defaults when it does not exist.
    /// A file that exists but fails to parse is a real error.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::get_path()
            && path.exists()
        {
            let content = fs::read_to_string(&path)?;
            let config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }
}
