//! Configuration module for the Gambit runtime.
//!
//! This module provides TOML-based configuration loading and validation
//! for the bot identity, logging, storage, and league channel mappings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    BotSettings, GambitConfig, LeagueConfig, LogFormat, LogLevel, LogOutput, LoggingConfig,
    StorageConfig,
};
pub use validation::validate_config;
