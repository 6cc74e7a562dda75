//! Channel metadata and the lookup collaborators.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A snapshot of channel metadata, fetched once per inbound event.
///
/// Channel info is never cached across events — every event re-resolves its
/// channel, so a snapshot has no identity beyond the event it was fetched
/// for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Platform id of the channel.
    pub id: String,

    /// Display name, when the platform exposes one.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether this is a one-on-one direct-message channel.
    #[serde(default)]
    pub is_direct_message: bool,

    /// Whether this is a group channel.
    #[serde(default)]
    pub is_group: bool,
}

impl ChannelInfo {
    /// Creates a public channel snapshot with a display name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            is_direct_message: false,
            is_group: false,
        }
    }

    /// Creates a direct-message channel snapshot.
    pub fn direct_message(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_direct_message: true,
            is_group: false,
        }
    }

    /// Creates a group channel snapshot.
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            is_direct_message: false,
            is_group: true,
        }
    }
}

/// Collaborator that resolves a channel id to its metadata.
///
/// Implementations wrap whatever lookup the platform offers. A failed or
/// non-ok lookup is reported as `None` — never as a panic or an error the
/// dispatcher has to interpret. The ingestion boundary logs the miss and
/// drops that single event; there is no retry.
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    /// Resolves `channel_id`, or returns `None` when the lookup fails.
    async fn resolve(&self, channel_id: &str) -> Option<ChannelInfo>;
}

/// Collaborator that maps a channel to the league it belongs to.
///
/// League commands need to know which league the originating channel is
/// associated with; plain commands do not. The lookup is pure and
/// synchronous — implementations typically hold a static channel-to-league
/// table built from configuration.
pub trait LeagueResolver: Send + Sync {
    /// Returns the league name for `channel`, or `None` when the channel is
    /// not associated with any league.
    fn league_for(&self, channel: &ChannelInfo) -> Option<String>;
}
