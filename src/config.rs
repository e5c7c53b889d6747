use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::node::descriptor::{DEFAULT_APPEND, DEFAULT_REMOVE, DEFAULT_REPLACE};

/// Main tagfilter configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub rules: RulesConfig,
}

/// Log verbosity, mapped onto `log::LevelFilter`
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Inline rule texts, in the same line format the node widgets use
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    pub remove: String,
    pub replace: String,
    pub append: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            remove: DEFAULT_REMOVE.to_string(),
            replace: DEFAULT_REPLACE.to_string(),
            append: DEFAULT_APPEND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let path = Self::expand_path(path);
            return Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check TAGFILTER_CONFIG env var
        if let Ok(env_path) = std::env::var("TAGFILTER_CONFIG") {
            let path = Self::expand_path(Path::new(&env_path));
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from TAGFILTER_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try TAGFILTER_DIR/tagfilter.yaml, then ~/.config/tagfilter/tagfilter.yaml
        let path = Self::tagfilter_dir().join("tagfilter.yaml");
        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        // Try ./tagfilter.yaml (for development)
        let local_config = PathBuf::from("tagfilter.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Get the tagfilter config directory
    pub fn tagfilter_dir() -> PathBuf {
        std::env::var("TAGFILTER_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("tagfilter"))
    }

    /// Get the log directory
    pub fn log_dir() -> PathBuf {
        std::env::var("TAGFILTER_LOG_DIR").map(PathBuf::from).unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tagfilter")
                .join("logs")
        })
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }

    /// Read a dotted config key as a string
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "log_level" | "log-level" => Some(self.log_level.as_filter().to_string()),
            "rules.remove" => Some(self.rules.remove.clone()),
            "rules.replace" => Some(self.rules.replace.clone()),
            "rules.append" => Some(self.rules.append.clone()),
            _ => None,
        }
    }
}
