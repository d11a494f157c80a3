use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for mkit
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MkitConfig {
    /// Queue stress run settings
    #[serde(default)]
    pub stress: StressConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shape of a multi-producer/multi-consumer stress run against the queue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StressConfig {
    #[serde(default = "default_producers")]
    pub producers: usize,

    #[serde(default = "default_consumers")]
    pub consumers: usize,

    /// Distinct values enqueued by each producer
    #[serde(default = "default_per_producer")]
    pub per_producer: usize,

    /// Wall-clock budget for the whole run; exceeding it fails the run
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl StressConfig {
    /// Values moved through the queue in one run, `None` if that overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        self.producers.checked_mul(self.per_producer)
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            producers: default_producers(),
            consumers: default_consumers(),
            per_producer: default_per_producer(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "pretty", "compact", "full"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_producers() -> usize {
    10
}
fn default_consumers() -> usize {
    10
}
fn default_per_producer() -> usize {
    1000
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

const LOCAL_CONFIG_FILE: &str = ".mkit.toml";

/// Configuration manager with layered sources
#[derive(Debug)]
pub struct ConfigManager {
    config: MkitConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables (.env file)
    /// 2. Config file (.mkit.toml, then ~/.mkit/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_dotenv();

        let (config, config_path) = Self::load_config_file()?;
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());
        Self::validate_config(&config)?;

        match config_path {
            Some(ref path) => info!("Loaded config from {}", path.display()),
            None => info!("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Load a specific TOML file, still honoring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_toml_file(path)?;
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());
        Self::validate_config(&config)?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    fn load_dotenv() {
        if Path::new(".env").exists() {
            if let Err(e) = dotenv::from_filename(".env") {
                warn!("Failed to load .env file: {}", e);
            }
        }
    }

    fn load_config_file() -> Result<(MkitConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((MkitConfig::default(), None))
    }

    /// `~/.mkit/config.toml`, when a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mkit").join("config.toml"))
    }

    fn read_toml_file(path: &Path) -> Result<MkitConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn apply_env_overrides<F>(mut config: MkitConfig, lookup: F) -> MkitConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
            let raw = raw?;
            match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring {}={:?}: not a number", key, raw);
                    None
                }
            }
        }

        if let Some(n) = parsed::<usize>("MKIT_PRODUCERS", lookup("MKIT_PRODUCERS")) {
            config.stress.producers = n;
        }
        if let Some(n) = parsed::<usize>("MKIT_CONSUMERS", lookup("MKIT_CONSUMERS")) {
            config.stress.consumers = n;
        }
        if let Some(n) = parsed::<usize>("MKIT_PER_PRODUCER", lookup("MKIT_PER_PRODUCER")) {
            config.stress.per_producer = n;
        }
        if let Some(ms) = parsed::<u64>("MKIT_TIMEOUT_MS", lookup("MKIT_TIMEOUT_MS")) {
            config.stress.timeout_ms = ms;
        }
        if let Some(level) = lookup("MKIT_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("MKIT_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    pub fn validate_config(config: &MkitConfig) -> Result<(), ConfigError> {
        if config.stress.producers == 0 {
            return Err(ConfigError::ValidationError(
                "stress.producers must be >= 1".to_string(),
            ));
        }
        if config.stress.consumers == 0 {
            return Err(ConfigError::ValidationError(
                "stress.consumers must be >= 1".to_string(),
            ));
        }
        if config.stress.total().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "stress.producers * stress.per_producer overflows: {} * {}",
                config.stress.producers, config.stress.per_producer
            )));
        }
        if config.stress.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "stress.timeout_ms must be > 0".to_string(),
            ));
        }

        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        match config.logging.format.as_str() {
            "pretty" | "compact" | "full" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {}. Must be one of: pretty, compact, full",
                    other
                )))
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &MkitConfig {
        &self.config
    }

    pub fn into_config(self) -> MkitConfig {
        self.config
    }

    /// Get the path to the config file that was loaded, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Create a default config file
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let config = MkitConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        }

        std::fs::write(path, toml_str).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Ok(())
    }
}
