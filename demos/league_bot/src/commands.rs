//! Listener definitions for the league bot.

use std::sync::Arc;

use gambit::framework::RegistryResult;
use gambit::prelude::*;

const SOURCE_URL: &str = "https://github.com/lichess4545/gambit";

const COMMAND_LIST: &str = "\
I will respond to the following commands when they are spoken to me:
  `source` - show the source code link
  `commands` / `help` - show this list
  `ping channel` - ping everyone in the channel
  `rating <player>` - show the player's cached rating";

/// `source` - replies with the source code link.
pub fn source() -> RegistryResult<Listener> {
    Listener::builder()
        .name("source")
        .pattern(r"^source$")
        .categories([
            MessageCategory::DirectMention,
            MessageCategory::DirectMessage,
        ])
        .command(|_msg, replier| async move {
            replier.say(SOURCE_URL).await;
            Ok(())
        })
}

/// `commands`, `command list`, `help` - replies with the command list.
pub fn commands() -> RegistryResult<Listener> {
    Listener::builder()
        .name("commands")
        .patterns([r"^commands$", r"^command list$", r"^help$"])
        .categories([
            MessageCategory::DirectMention,
            MessageCategory::DirectMessage,
        ])
        .command(|_msg, replier| async move {
            replier.say(COMMAND_LIST).await;
            Ok(())
        })
}

/// `ping channel` - pings everyone in the channel. Mention-only so the bot
/// can't be tricked into pinging a channel from a DM.
pub fn ping_channel() -> RegistryResult<Listener> {
    Listener::builder()
        .name("ping-channel")
        .pattern(r"^ping channel$")
        .category(MessageCategory::DirectMention)
        .command(|_msg, replier| async move {
            replier.say("<!channel>").await;
            Ok(())
        })
}

/// `rating <player>` - looks up the player's cached rating. The reply is
/// scoped to the league the channel belongs to.
pub fn rating(store: Arc<dyn Datastore>) -> RegistryResult<Listener> {
    Listener::builder()
        .name("rating")
        .pattern(r"^rating (\S+)$")
        .categories([
            MessageCategory::DirectMention,
            MessageCategory::DirectMessage,
        ])
        .league_command(move |msg, league, replier| {
            let store = Arc::clone(&store);
            async move {
                let Some(username) = msg.group(1).map(str::to_string) else {
                    replier.say("Whose rating did you want?").await;
                    return Ok(());
                };

                let league = league.unwrap_or_else(|| "no particular league".to_string());
                match store.rating(&username).await? {
                    Some(PlayerRating {
                        rating: Some(rating),
                        ..
                    }) => {
                        replier
                            .say(format!("{username} is rated {rating} ({league})"))
                            .await;
                    }
                    _ => {
                        replier
                            .say(format!("I don't have a rating for {username} yet"))
                            .await;
                    }
                }
                Ok(())
            }
        })
}
