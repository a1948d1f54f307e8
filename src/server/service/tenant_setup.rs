//! Administrative configuration of a guild's token gate.
//!
//! Backs the `/server-setup` and `/edit-config` commands. Every input is validated
//! before anything is written, and the role check uses the same hierarchy rules the
//! reconciler applies before touching roles.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::tenant_config::TenantConfigRepository,
    error::AppError,
    model::{
        balance::parse_raw_amount,
        reconciliation::TenantSkip,
        tenant_config::{
            EditTenantParam, RoleChoice, SetupTenantParam, TenantConfig, TenantConfigUpdate,
            UpsertTenantConfigParam,
        },
    },
    service::reconciliation::traits::GuildGateway,
    util::parse::parse_public_key,
};

/// RPC endpoint used when setup does not name one.
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Largest number of display decimals accepted.
pub const MAX_TOKEN_DECIMALS: i64 = 18;

const NO_CONFIG: &str = "No configuration found for this server. Please run `/server-setup` first.";

pub struct TenantSetupService<'a> {
    db: &'a DatabaseConnection,
    guilds: &'a dyn GuildGateway,
}

impl<'a> TenantSetupService<'a> {
    /// Creates a new setup service.
    ///
    /// # Arguments
    /// - `db` - Database connection for tenant configuration writes
    /// - `guilds` - Guild access used to check the bot can manage the chosen role
    pub fn new(db: &'a DatabaseConnection, guilds: &'a dyn GuildGateway) -> Self {
        Self { db, guilds }
    }

    /// Creates or replaces a guild's configuration and marks its setup complete.
    ///
    /// # Arguments
    /// - `param` - Options given to `/server-setup`
    ///
    /// # Returns
    /// - `Ok(TenantConfig)` - The stored configuration
    /// - `Err(AppError::BadRequest)` - An option is invalid or the bot cannot manage the
    ///   role; the message is meant for the admin
    /// - `Err(AppError::InternalError)` - Bot permissions in the guild could not be read
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn setup(&self, param: SetupTenantParam) -> Result<TenantConfig, AppError> {
        let token_mint = validate_mint(&param.token_mint)?;
        let rpc_url = validate_rpc_url(param.rpc_url.as_deref().unwrap_or(DEFAULT_RPC_URL))?;
        self.check_role(param.tenant_id, &param.role).await?;
        let required_balance = validate_required_balance(&param.required_balance)?;
        let token_decimals = param.token_decimals.map(validate_decimals).transpose()?;

        let tenant = TenantConfigRepository::new(self.db)
            .upsert(UpsertTenantConfigParam {
                tenant_id: param.tenant_id,
                server_name: param.server_name,
                token_mint,
                required_balance,
                role_id: param.role.role_id,
                rpc_url,
                setup_complete: true,
                admin_user_id: Some(param.admin_user_id),
                token_symbol: param.token_symbol.and_then(non_blank),
                token_decimals,
            })
            .await?;

        tracing::info!(
            tenant_id = tenant.tenant_id,
            admin_user_id = param.admin_user_id,
            role_id = tenant.role_id,
            "Token gate configured"
        );

        Ok(tenant)
    }

    /// Changes selected settings of an existing configuration.
    ///
    /// Options are validated in the order they appear in the command and the first
    /// invalid one is reported. Nothing is written unless every given option is valid.
    ///
    /// # Arguments
    /// - `param` - Options given to `/edit-config`
    ///
    /// # Returns
    /// - `Ok((TenantConfig, TenantConfigUpdate))` - Updated configuration and the changes
    ///   that were applied
    /// - `Err(AppError::NotFound)` - Guild was never set up
    /// - `Err(AppError::BadRequest)` - An option is invalid or no option was given
    /// - `Err(AppError::InternalError)` - Bot permissions in the guild could not be read
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn edit(
        &self,
        param: EditTenantParam,
    ) -> Result<(TenantConfig, TenantConfigUpdate), AppError> {
        let repo = TenantConfigRepository::new(self.db);
        let tenant_id = param.tenant_id;

        if repo.find(tenant_id).await?.is_none() {
            return Err(AppError::NotFound(NO_CONFIG.to_string()));
        }

        let mut update = TenantConfigUpdate {
            token_mint: param.token_mint.as_deref().map(validate_mint).transpose()?,
            required_balance: param
                .required_balance
                .as_deref()
                .map(validate_required_balance)
                .transpose()?,
            ..Default::default()
        };

        if let Some(role) = &param.role {
            self.check_role(tenant_id, role).await?;
            update.role_id = Some(role.role_id);
        }

        update.rpc_url = param.rpc_url.as_deref().map(validate_rpc_url).transpose()?;
        update.token_symbol = param.token_symbol.map(|symbol| {
            if symbol.trim().eq_ignore_ascii_case("remove") {
                None
            } else {
                non_blank(symbol)
            }
        });
        update.token_decimals = param.token_decimals.map(validate_decimals).transpose()?;

        if update.is_empty() {
            return Err(AppError::BadRequest(
                "No valid changes specified. Please provide at least one option to modify the \
                 configuration."
                    .to_string(),
            ));
        }

        repo.update(tenant_id, update.clone()).await?;

        let tenant = repo
            .find(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_CONFIG.to_string()))?;

        tracing::info!(tenant_id, ?update, "Token gate configuration edited");

        Ok((tenant, update))
    }

    /// Rejects roles the bot could never grant.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    /// - `role` - Role chosen by the admin
    ///
    /// # Returns
    /// - `Ok(())` - The bot can grant and revoke the role
    /// - `Err(AppError::BadRequest)` - Managed, @everyone, unknown or unmanageable role
    /// - `Err(AppError::InternalError)` - Guild or bot member could not be resolved
    async fn check_role(&self, tenant_id: u64, role: &RoleChoice) -> Result<(), AppError> {
        if role.managed || role.role_id == tenant_id {
            return Err(AppError::BadRequest(
                "Cannot assign a managed role or the @everyone role.".to_string(),
            ));
        }

        let hierarchy = match self.guilds.resolve_tenant(tenant_id, role.role_id).await {
            Ok(hierarchy) => hierarchy,
            Err(TenantSkip::RoleNotFound) => {
                return Err(AppError::BadRequest("Invalid role selected.".to_string()));
            }
            Err(skip) => {
                return Err(AppError::InternalError(format!(
                    "Could not verify bot permissions in guild {}: {}",
                    tenant_id, skip
                )));
            }
        };

        hierarchy.check_manageable().map_err(|skip| {
            tracing::debug!(tenant_id, role_id = role.role_id, "Rejected role: {}", skip);
            AppError::BadRequest(format!(
                "The bot lacks permissions or has insufficient hierarchy to assign the role \
                 `{}`. Ensure the bot's role is higher than this role and has 'Manage Roles' \
                 permission.",
                role.name
            ))
        })
    }
}

fn validate_mint(value: &str) -> Result<String, AppError> {
    parse_public_key(value)
        .map(|_| value.trim().to_string())
        .ok_or_else(|| AppError::BadRequest("Invalid Solana token address format.".to_string()))
}

/// Accepts a raw integer amount, ignoring comma separators.
///
/// # Returns
/// - `Ok(String)` - Canonical decimal string without separators or leading zeros
/// - `Err(AppError::BadRequest)` - Not a non-negative integer
fn validate_required_balance(value: &str) -> Result<String, AppError> {
    let stripped: String = value.chars().filter(|c| *c != ',').collect();

    parse_raw_amount(&stripped)
        .map(|amount| amount.to_string())
        .map_err(|_| {
            AppError::BadRequest(
                "Invalid required balance format. Please provide the raw token amount (e.g., \
                 1000000)."
                    .to_string(),
            )
        })
}

fn validate_rpc_url(value: &str) -> Result<String, AppError> {
    let invalid = || AppError::BadRequest("Invalid RPC URL format.".to_string());

    let url = url::Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    Ok(value.trim().to_string())
}

fn validate_decimals(value: i64) -> Result<u32, AppError> {
    if !(0..=MAX_TOKEN_DECIMALS).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "Token decimals must be between 0 and {}.",
            MAX_TOKEN_DECIMALS
        )));
    }

    Ok(value as u32)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
