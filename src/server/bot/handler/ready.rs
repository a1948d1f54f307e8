//! Ready and cache-ready event handlers.
//!
//! `ready` fires once per gateway connection, before the guilds it lists are cached.
//! `cache_ready` fires once every listed guild has arrived through `guild_create`, and
//! only then is the reconciliation scheduler allowed to tick.

use serenity::all::{ActivityData, Context, Ready};
use tokio::sync::watch;

/// Handles the ready event when the bot connects to Discord.
///
/// A bot in no guilds never receives `cache_ready`, so readiness is published here
/// instead.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
/// - `bot_ready` - Readiness flag read by the reconciliation scheduler
pub async fn handle_ready(ctx: Context, ready: Ready, bot_ready: &watch::Sender<bool>) {
    tracing::info!(
        guilds = ready.guilds.len(),
        "{} is connected to Discord",
        ready.user.name
    );

    ctx.set_activity(Some(ActivityData::custom("Checking token holders")));

    if ready.guilds.is_empty() {
        publish_ready(bot_ready);
    }
}

/// Handles the cache-ready event once every guild from `ready` is cached.
///
/// # Arguments
/// - `guilds` - Number of guilds now in the cache
/// - `bot_ready` - Readiness flag read by the reconciliation scheduler
pub fn handle_cache_ready(guilds: usize, bot_ready: &watch::Sender<bool>) {
    tracing::info!(guilds, "Guild cache populated");

    publish_ready(bot_ready);
}

fn publish_ready(bot_ready: &watch::Sender<bool>) {
    if !bot_ready.send_replace(true) {
        tracing::debug!("Reconciliation cleared to start");
    }
}
