//! Configuration validation utilities.

use std::collections::{HashMap, HashSet};

use super::error::{ConfigError, ConfigResult};
use super::schema::{GambitConfig, LeagueConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &GambitConfig) -> ConfigResult<()> {
    validate_bot_settings(config)?;
    validate_leagues(&config.leagues)?;

    if config.storage.connect_timeout_ms == 0 {
        return Err(ConfigError::validation(
            "Storage connect timeout must be greater than 0",
        ));
    }

    Ok(())
}

fn validate_bot_settings(config: &GambitConfig) -> ConfigResult<()> {
    if config.bot.bot_id.is_empty() {
        return Err(ConfigError::missing_field("bot.bot_id"));
    }

    if config.bot.apology_text.is_empty() {
        return Err(ConfigError::validation("Apology text must not be empty"));
    }

    Ok(())
}

/// Validates league mappings: names must be unique and no channel may
/// belong to two leagues.
fn validate_leagues(leagues: &[LeagueConfig]) -> ConfigResult<()> {
    let mut seen_names = HashSet::new();
    let mut channel_owners: HashMap<&str, &str> = HashMap::new();

    for league in leagues {
        if league.name.is_empty() {
            return Err(ConfigError::missing_field("leagues.name"));
        }

        if !seen_names.insert(league.name.as_str()) {
            return Err(ConfigError::DuplicateLeague(league.name.clone()));
        }

        for channel in &league.channels {
            if let Some(first) = channel_owners.insert(channel, &league.name) {
                return Err(ConfigError::AmbiguousChannel {
                    channel: channel.clone(),
                    first: first.to_string(),
                    second: league.name.clone(),
                });
            }
        }
    }

    Ok(())
}
