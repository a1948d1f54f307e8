//! Slash command handling.
//!
//! `/verify` for members plus `/server-setup` and `/edit-config` for admins. Commands are
//! registered outside the bot. Every reply is ephemeral and never pings roles.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, Context, CreateAllowedMentions, CreateInteractionResponse,
    CreateInteractionResponseMessage, Interaction,
};
use std::time::Duration;

use crate::server::{
    bot::handler::admin::{self, EDIT_CONFIG_COMMAND, SETUP_COMMAND},
    error::AppError,
    model::{balance::format_token_amount, verification::VerificationAction},
    service::verification::{
        code::VerificationCodeService,
        start::{VerificationInvite, VerificationStartService},
    },
};

const VERIFY_COMMAND: &str = "verify";

/// Handles an interaction created event.
///
/// # Arguments
/// - `db` - Database connection for tenant and holder lookups
/// - `codes` - Store the issued verification code is written to
/// - `app_url` - Base URL of the wallet-connection page
/// - `ctx` - Discord context for replying
/// - `interaction` - The interaction; non-command interactions are ignored
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    codes: &VerificationCodeService,
    app_url: &str,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let content = match (command.guild_id, command.data.name.as_str()) {
        (None, _) => "This command can only be used in a server.".to_string(),
        (Some(guild_id), VERIFY_COMMAND) => {
            verify_reply(db, codes, app_url, &command, guild_id.get()).await
        }
        (Some(guild_id), SETUP_COMMAND) => {
            admin::server_setup_reply(db, &ctx, &command, guild_id).await
        }
        (Some(guild_id), EDIT_CONFIG_COMMAND) => {
            admin::edit_config_reply(db, &ctx, &command, guild_id).await
        }
        (Some(_), name) => {
            tracing::warn!("Received unknown command /{}", name);
            "Unknown command.".to_string()
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true)
            .allowed_mentions(CreateAllowedMentions::new()),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{}: {}", command.data.name, e);
    }
}

async fn verify_reply(
    db: &DatabaseConnection,
    codes: &VerificationCodeService,
    app_url: &str,
    command: &CommandInteraction,
    tenant_id: u64,
) -> String {
    let user_id = command.user.id.get();

    match VerificationStartService::new(db, codes)
        .start(tenant_id, user_id)
        .await
    {
        Ok(Some(invite)) => verify_reply_content(&invite, app_url, codes.ttl()),
        Ok(None) => "Verification has not been configured for this server yet. An \
                     administrator needs to run the `/server-setup` command."
            .to_string(),
        Err(AppError::BalanceErr(e)) => {
            tracing::error!(tenant_id, "Invalid required balance in config: {}", e);
            "Server configuration error (invalid balance). Please contact an admin.".to_string()
        }
        Err(e) => {
            tracing::error!(tenant_id, user_id, "Failed to start verification: {}", e);
            "There was a database error while checking your verification status. Please try \
             again later."
                .to_string()
        }
    }
}

/// Builds the ephemeral `/verify` reply carrying the personal verification link.
pub fn verify_reply_content(invite: &VerificationInvite, app_url: &str, ttl: Duration) -> String {
    let tenant = &invite.tenant;
    let requirement = format_token_amount(
        &invite.required,
        tenant.token_decimals,
        tenant.token_symbol.as_deref(),
    );

    let wallet_status = match invite.linked_wallets {
        0 => "You haven't connected any wallets for this server yet.".to_string(),
        n => format!("You currently have {} wallet(s) linked.", n),
    };

    let action = match invite.action {
        VerificationAction::New => "Connect New Wallet",
        VerificationAction::Add => "Add Another Wallet",
    };

    let minutes = (ttl.as_secs() / 60).max(1);

    format!(
        "**Token Verification for {}**\n\
         You need at least `{}` of the token (`{}`) in a connected Solana wallet to get the \
         <@&{}> role.\n\n\
         {}\n\n\
         **{}**: {}/?code={}\n\n\
         This link is unique to you and will expire in {} minute(s). Do not share it.",
        tenant.server_name,
        requirement,
        tenant.token_mint,
        tenant.role_id,
        wallet_status,
        action,
        app_url,
        invite.code,
        minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::tenant_config::TenantConfig;
    use num_bigint::BigUint;

    fn invite(action: VerificationAction, linked_wallets: usize) -> VerificationInvite {
        VerificationInvite {
            code: "c0de".to_string(),
            action,
            tenant: TenantConfig {
                tenant_id: 42,
                server_name: "Gate Club".to_string(),
                token_mint: "MintAddr".to_string(),
                required_balance: "1500000".to_string(),
                role_id: 77,
                rpc_url: "http://localhost:8899".to_string(),
                setup_complete: true,
                token_symbol: Some("GATE".to_string()),
                token_decimals: Some(6),
            },
            required: BigUint::from(1_500_000u32),
            linked_wallets,
        }
    }

    #[test]
    fn first_wallet_reply_links_new_code() {
        let content = verify_reply_content(
            &invite(VerificationAction::New, 0),
            "https://gate.example",
            Duration::from_secs(300),
        );

        assert!(content.starts_with("**Token Verification for Gate Club**"));
        assert!(content.contains("`1.5 GATE` of the token (`MintAddr`)"));
        assert!(content.contains("<@&77> role"));
        assert!(content.contains("You haven't connected any wallets"));
        assert!(content.contains("**Connect New Wallet**: https://gate.example/?code=c0de"));
        assert!(content.contains("expire in 5 minute(s)"));
    }

    #[test]
    fn existing_holder_reply_offers_additional_wallet() {
        let content = verify_reply_content(
            &invite(VerificationAction::Add, 2),
            "https://gate.example",
            Duration::from_secs(30),
        );

        assert!(content.contains("You currently have 2 wallet(s) linked."));
        assert!(content.contains("**Add Another Wallet**"));
        assert!(content.contains("expire in 1 minute(s)"));
    }
}
