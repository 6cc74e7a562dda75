//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use gambit_framework::DEFAULT_APOLOGY;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GambitConfig {
    /// Bot identity and reply behaviour.
    #[serde(default)]
    pub bot: BotSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Datastore configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// League channel mappings.
    #[serde(default)]
    pub leagues: Vec<LeagueConfig>,
}

/// Bot identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// The bot's own user identifier, as it appears in mention tokens.
    #[serde(default)]
    pub bot_id: String,

    /// Reply sent when a listener callback fails.
    #[serde(default = "default_apology")]
    pub apology_text: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            bot_id: String::new(),
            apology_text: default_apology(),
        }
    }
}

fn default_apology() -> String {
    DEFAULT_APOLOGY.to_string()
}

/// Log level (trace, debug, info, warn, error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing::Level`.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line format.
    #[default]
    Compact,
    /// Full format with all fields.
    Full,
    /// Multi-line human-readable format.
    Pretty,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Base log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, used when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module level overrides, e.g. `gambit_framework = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

/// Datastore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// How long to wait for the datastore connection before giving up,
    /// in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl StorageConfig {
    /// Returns the connection timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

/// A league and the channels that belong to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// League name, passed to league-scoped listener callbacks.
    pub name: String,

    /// Channel names belonging to this league.
    #[serde(default)]
    pub channels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = GambitConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.storage.connect_timeout_ms, 10_000);
        assert_eq!(config.bot.apology_text, DEFAULT_APOLOGY);
        assert!(config.leagues.is_empty());
    }

    #[test]
    fn league_config_deserializes_from_toml_shape() {
        let config: GambitConfig = serde_json::from_value(serde_json::json!({
            "bot": { "bot_id": "UGAMBIT" },
            "leagues": [
                { "name": "team4545", "channels": ["team-scheduling", "team-general"] },
                { "name": "lonewolf", "channels": ["lonewolf-general"] }
            ]
        }))
        .unwrap();

        assert_eq!(config.bot.bot_id, "UGAMBIT");
        assert_eq!(config.leagues.len(), 2);
        assert_eq!(config.leagues[0].channels[0], "team-scheduling");
    }

    #[test]
    fn log_level_is_case_mapped() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(level.to_tracing_level(), tracing::Level::DEBUG);
    }
}
