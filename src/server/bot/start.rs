use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use tokio::sync::watch;

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError,
    service::verification::code::VerificationCodeService,
};

/// Builds the Discord client without connecting it.
///
/// The returned client's `cache` and `http` back the guild gateway used by
/// reconciliation, so they must be taken before the client is moved into `start_bot`.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token and app URL
/// - `db` - Database connection for the event handler
/// - `codes` - Verification code store shared with the HTTP API
/// - `bot_ready` - Flag set once the guild cache is populated
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    codes: VerificationCodeService,
    bot_ready: watch::Sender<bool>,
) -> Result<Client, AppError> {
    // GUILD_MEMBERS is privileged and must be enabled in the Developer Portal; it keeps
    // member roles in the cache current
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(db, codes, config.app_url.clone(), bot_ready);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Runs the Discord bot until its shards shut down.
///
/// Should be called from within a `tokio::spawn` task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
