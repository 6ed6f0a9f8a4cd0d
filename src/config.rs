use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

/// File looked up in the current directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "userdata.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub processor: ProcessorConfig,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter level, overridden by RUST_LOG
    #[serde(default = "default_level")]
    pub level: String,

    /// Output destination ("stdout" or "stderr")
    #[serde(default = "default_output")]
    pub output: String,
}

/// Profile generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessorConfig {
    /// Prefix prepended to every generated profile id
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// How many leading characters of the name go into the id
    #[serde(default = "default_name_prefix_len")]
    pub name_prefix_len: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            output: default_output(),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            name_prefix_len: default_name_prefix_len(),
        }
    }
}

// Default functions for serde
fn default_level() -> String { "info".to_string() }
fn default_output() -> String { "stderr".to_string() }
fn default_id_prefix() -> String { "user_".to_string() }
fn default_name_prefix_len() -> usize { 3 }

impl Config {
    /// Load configuration from userdata.yaml, or use defaults if not found
    pub fn load() -> Result<Self> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        Ok(config)
    }
}
