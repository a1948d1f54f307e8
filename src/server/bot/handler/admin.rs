//! `/server-setup` and `/edit-config` slash commands.
//!
//! Both are limited to members with Administrator in the guild the command is run in.
//! Option values are handed to `TenantSetupService` unvalidated, and its validation
//! messages are shown to the admin as-is.

use num_bigint::BigUint;
use sea_orm::DatabaseConnection;
use serenity::all::{CommandInteraction, Context, GuildId, ResolvedValue};

use crate::server::{
    error::AppError,
    model::{
        balance::{format_token_amount, parse_raw_amount},
        tenant_config::{
            EditTenantParam, RoleChoice, SetupTenantParam, TenantConfig, TenantConfigUpdate,
        },
    },
    service::{discord::SerenityGuildGateway, tenant_setup::TenantSetupService},
};

pub const SETUP_COMMAND: &str = "server-setup";
pub const EDIT_CONFIG_COMMAND: &str = "edit-config";

const ADMIN_ONLY: &str = "You need Administrator permissions to use this command.";

/// Options shared by both commands, keyed by their option names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOptions {
    pub token_address: Option<String>,
    pub required_balance: Option<String>,
    pub role: Option<RoleChoice>,
    pub rpc_url: Option<String>,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<i64>,
}

impl ConfigOptions {
    /// Reads the options the admin supplied, ignoring unknown names and mistyped values.
    pub fn from_command(command: &CommandInteraction) -> Self {
        let mut options = Self::default();

        for option in command.data.options() {
            match (option.name, option.value) {
                ("token_address", ResolvedValue::String(value)) => {
                    options.token_address = Some(value.to_string())
                }
                ("required_balance", ResolvedValue::String(value)) => {
                    options.required_balance = Some(value.to_string())
                }
                ("role_to_grant", ResolvedValue::Role(role)) => {
                    options.role = Some(RoleChoice {
                        role_id: role.id.get(),
                        name: role.name.clone(),
                        managed: role.managed,
                    })
                }
                ("rpc_url", ResolvedValue::String(value)) => {
                    options.rpc_url = Some(value.to_string())
                }
                ("token_symbol", ResolvedValue::String(value)) => {
                    options.token_symbol = Some(value.to_string())
                }
                ("token_decimals", ResolvedValue::Integer(value)) => {
                    options.token_decimals = Some(value)
                }
                _ => {}
            }
        }

        options
    }

    /// Builds setup parameters, or `None` when a required option is missing.
    pub fn into_setup_param(
        self,
        tenant_id: u64,
        server_name: String,
        admin_user_id: u64,
    ) -> Option<SetupTenantParam> {
        Some(SetupTenantParam {
            tenant_id,
            server_name,
            admin_user_id,
            token_mint: self.token_address?,
            required_balance: self.required_balance?,
            role: self.role?,
            rpc_url: self.rpc_url,
            token_symbol: self.token_symbol,
            token_decimals: self.token_decimals,
        })
    }

    pub fn into_edit_param(self, tenant_id: u64) -> EditTenantParam {
        EditTenantParam {
            tenant_id,
            token_mint: self.token_address,
            required_balance: self.required_balance,
            role: self.role,
            rpc_url: self.rpc_url,
            token_symbol: self.token_symbol,
            token_decimals: self.token_decimals,
        }
    }
}

/// Runs `/server-setup` and returns the reply content.
///
/// # Arguments
/// - `db` - Database connection for the configuration write
/// - `ctx` - Discord context whose cache and HTTP client back the role check
/// - `command` - The command interaction
/// - `guild_id` - Guild the command was run in
pub async fn server_setup_reply(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
) -> String {
    if !is_admin(command) {
        return ADMIN_ONLY.to_string();
    }

    let tenant_id = guild_id.get();
    let server_name = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| tenant_id.to_string());

    let options = ConfigOptions::from_command(command);
    let role_name = options.role.as_ref().map(|role| role.name.clone());
    let Some(param) = options.into_setup_param(tenant_id, server_name, command.user.id.get())
    else {
        return "Missing required options (token_address, required_balance, role_to_grant)."
            .to_string();
    };

    let gateway = SerenityGuildGateway::new(ctx.cache.clone(), ctx.http.clone());

    match TenantSetupService::new(db, &gateway).setup(param).await {
        Ok(tenant) => setup_reply_content(&tenant, role_name.as_deref().unwrap_or_default()),
        Err(e) => admin_error_content(SETUP_COMMAND, tenant_id, e),
    }
}

/// Runs `/edit-config` and returns the reply content.
///
/// # Arguments
/// - `db` - Database connection for the configuration write
/// - `ctx` - Discord context whose cache and HTTP client back the role check
/// - `command` - The command interaction
/// - `guild_id` - Guild the command was run in
pub async fn edit_config_reply(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
) -> String {
    if !is_admin(command) {
        return ADMIN_ONLY.to_string();
    }

    let tenant_id = guild_id.get();
    let options = ConfigOptions::from_command(command);
    let role_name = options.role.as_ref().map(|role| role.name.clone());

    let gateway = SerenityGuildGateway::new(ctx.cache.clone(), ctx.http.clone());

    match TenantSetupService::new(db, &gateway)
        .edit(options.into_edit_param(tenant_id))
        .await
    {
        Ok((tenant, update)) => edit_reply_content(&tenant, &update, role_name.as_deref()),
        Err(e) => admin_error_content(EDIT_CONFIG_COMMAND, tenant_id, e),
    }
}

/// Whether the invoking member holds Administrator in the guild.
fn is_admin(command: &CommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

/// Summarizes a freshly stored configuration for the admin.
pub fn setup_reply_content(tenant: &TenantConfig, role_name: &str) -> String {
    let decimals = tenant
        .token_decimals
        .map(|d| format!("\n- Token Decimals: {}", d))
        .unwrap_or_default();

    format!(
        "**Configuration saved!**\n\
         - Token Address: `{}`\n\
         - Required Balance: `{}` (Raw: {})\n\
         - Role Granted: <@&{}> (`{}`)\n\
         - Solana RPC URL: `{}`{}\n\n\
         Members can now run `/verify` to get the role.",
        tenant.token_mint,
        display_required(tenant, &tenant.required_balance),
        tenant.required_balance,
        tenant.role_id,
        role_name,
        tenant.rpc_url,
        decimals
    )
}

/// Lists the settings an edit changed.
///
/// # Arguments
/// - `tenant` - Configuration after the edit, used for amount formatting
/// - `update` - Changes that were applied
/// - `role_name` - Name of the newly chosen role, if the role changed
pub fn edit_reply_content(
    tenant: &TenantConfig,
    update: &TenantConfigUpdate,
    role_name: Option<&str>,
) -> String {
    let mut changes = Vec::new();

    if let Some(token_mint) = &update.token_mint {
        changes.push(format!("- Token Address: `{}`", token_mint));
    }
    if let Some(required) = &update.required_balance {
        changes.push(format!(
            "- Required Balance: `{}` (Raw: {})",
            display_required(tenant, required),
            required
        ));
    }
    if let Some(role_id) = update.role_id {
        changes.push(format!(
            "- Role Granted: <@&{}> (`{}`)",
            role_id,
            role_name.unwrap_or_default()
        ));
    }
    if let Some(rpc_url) = &update.rpc_url {
        changes.push(format!("- Solana RPC URL: `{}`", rpc_url));
    }
    match &update.token_symbol {
        Some(Some(symbol)) => changes.push(format!("- Token Symbol: {}", symbol)),
        Some(None) => changes.push("- Token Symbol: *(Removed)*".to_string()),
        None => {}
    }
    if let Some(decimals) = update.token_decimals {
        changes.push(format!("- Token Decimals: {}", decimals));
    }

    format!(
        "**Configuration updated!**\n\n**Changes:**\n{}\n\n\
         *Role assignments follow the new settings on the next balance check.*",
        changes.join("\n")
    )
}

/// Maps a setup failure to what the admin sees.
///
/// Validation and not-found messages are passed through. Anything else is logged and
/// replaced with a generic message.
pub fn admin_error_content(command_name: &str, tenant_id: u64, err: AppError) -> String {
    match err {
        AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
        AppError::DbErr(e) => {
            tracing::error!(tenant_id, "/{} failed to save configuration: {}", command_name, e);
            "Failed to save server configuration to the database. Please try again later."
                .to_string()
        }
        e => {
            tracing::error!(tenant_id, "/{} failed: {}", command_name, e);
            "An unexpected error occurred while saving the configuration. Please check the bot \
             logs or contact support."
                .to_string()
        }
    }
}

fn display_required(tenant: &TenantConfig, raw: &str) -> String {
    match parse_raw_amount(raw) {
        Ok(amount) => format_amount(&amount, tenant),
        Err(_) => raw.to_string(),
    }
}

fn format_amount(amount: &BigUint, tenant: &TenantConfig) -> String {
    format_token_amount(amount, tenant.token_decimals, tenant.token_symbol.as_deref())
}
