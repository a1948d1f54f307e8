//! Tenant configuration domain models.
//!
//! A tenant is a Discord guild that configured token gating. The configuration is
//! written by an administrative action and is read-only to reconciliation.

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Per-guild token gate settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantConfig {
    /// Discord guild ID.
    pub tenant_id: u64,
    /// Guild name at the time of setup, shown on the verification page.
    pub server_name: String,
    /// Token mint address.
    pub token_mint: String,
    /// Raw threshold in the token's smallest unit, kept as the stored decimal string.
    ///
    /// Parsed on use so a malformed value only skips the affected tenant.
    pub required_balance: String,
    /// Role granted to holders meeting the threshold.
    pub role_id: u64,
    /// RPC endpoint used for balance lookups.
    pub rpc_url: String,
    pub setup_complete: bool,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<u32>,
}

impl TenantConfig {
    /// Converts an entity model to a tenant config at the repository boundary.
    ///
    /// Negative or out-of-range decimals are dropped rather than rejected since they
    /// only affect display.
    ///
    /// # Returns
    /// - `Ok(TenantConfig)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored guild or role ID is not a u64
    pub fn from_entity(entity: entity::tenant_config::Model) -> Result<Self, AppError> {
        let tenant_id = parse_u64_from_string(entity.server_id)?;
        let role_id = parse_u64_from_string(entity.role_id)?;

        Ok(Self {
            tenant_id,
            server_name: entity.server_name,
            token_mint: entity.token_address,
            required_balance: entity.required_balance,
            role_id,
            rpc_url: entity.rpc_url,
            setup_complete: entity.setup_complete,
            token_symbol: entity.token_symbol,
            token_decimals: entity.token_decimals.and_then(|d| u32::try_from(d).ok()),
        })
    }
}

/// Parameters for creating or replacing a tenant configuration.
#[derive(Debug, Clone)]
pub struct UpsertTenantConfigParam {
    pub tenant_id: u64,
    pub server_name: String,
    pub token_mint: String,
    pub required_balance: String,
    pub role_id: u64,
    pub rpc_url: String,
    pub setup_complete: bool,
    pub admin_user_id: Option<u64>,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<u32>,
}

/// Partial update of an existing tenant configuration.
///
/// Unset fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantConfigUpdate {
    pub token_mint: Option<String>,
    /// Validated raw threshold.
    pub required_balance: Option<String>,
    pub role_id: Option<u64>,
    pub rpc_url: Option<String>,
    /// `Some(None)` clears the stored symbol.
    pub token_symbol: Option<Option<String>>,
    pub token_decimals: Option<u32>,
}

impl TenantConfigUpdate {
    /// True when no field is set, meaning no write is needed.
    pub fn is_empty(&self) -> bool {
        self.token_mint.is_none()
            && self.required_balance.is_none()
            && self.role_id.is_none()
            && self.rpc_url.is_none()
            && self.token_symbol.is_none()
            && self.token_decimals.is_none()
    }
}

/// Role picked in a slash command option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChoice {
    pub role_id: u64,
    pub name: String,
    /// Whether an integration owns the role, such as a bot's own role.
    pub managed: bool,
}

/// Raw `/server-setup` input, validated by `TenantSetupService::setup`.
#[derive(Debug, Clone)]
pub struct SetupTenantParam {
    pub tenant_id: u64,
    pub server_name: String,
    pub admin_user_id: u64,
    pub token_mint: String,
    pub required_balance: String,
    pub role: RoleChoice,
    /// Falls back to Solana mainnet-beta when unset.
    pub rpc_url: Option<String>,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<i64>,
}

/// Raw `/edit-config` input. Only the options the admin supplied are set.
#[derive(Debug, Clone, Default)]
pub struct EditTenantParam {
    pub tenant_id: u64,
    pub token_mint: Option<String>,
    pub required_balance: Option<String>,
    pub role: Option<RoleChoice>,
    pub rpc_url: Option<String>,
    /// `remove` (any case) clears the stored symbol.
    pub token_symbol: Option<String>,
    pub token_decimals: Option<i64>,
}
