//! Shared plumbing for the mkit crates
//!
//! - `error`: index errors shared by the sequential collections
//! - `config`: layered configuration (defaults, TOML file, environment)
//! - `logging`: tracing subscriber bootstrap

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigError, ConfigManager, LoggingConfig, MkitConfig, StressConfig};
pub use error::*;
pub use logging::init_tracing;
