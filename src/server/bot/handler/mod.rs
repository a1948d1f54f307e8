use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;
use tokio::sync::watch;

use crate::server::service::verification::code::VerificationCodeService;

pub mod admin;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub codes: VerificationCodeService,
    pub app_url: String,
    /// Set once the guild cache is populated; gates reconciliation ticks.
    pub bot_ready: watch::Sender<bool>,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        codes: VerificationCodeService,
        app_url: String,
        bot_ready: watch::Sender<bool>,
    ) -> Self {
        Self {
            db,
            codes,
            app_url,
            bot_ready,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, &self.bot_ready).await;
    }

    /// Called once every guild listed in the ready event is cached
    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        ready::handle_cache_ready(guilds.len(), &self.bot_ready);
    }

    /// Called when a user runs a slash command or presses a component
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(
            &self.db,
            &self.codes,
            &self.app_url,
            ctx,
            interaction,
        )
        .await;
    }
}
