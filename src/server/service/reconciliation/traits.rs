//! Collaborator seams of the reconciliation core.
//!
//! Production implementations live in `data::store`, `service::balance` and
//! `service::discord::guild_gateway`. Tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::server::{
    error::AppError,
    model::{
        balance::BalanceReading,
        discord::{GuildMember, RoleHierarchy},
        holder::{Holder, HolderUpdate},
        reconciliation::TenantSkip,
        tenant_config::TenantConfig,
    },
};

/// Source of tenant configurations.
#[async_trait]
pub trait TenantConfigStore: Send + Sync {
    /// Lists tenants whose setup is complete.
    async fn list_tenants(&self) -> Result<Vec<TenantConfig>, AppError>;
}

/// Persistent holder records.
#[async_trait]
pub trait HolderStore: Send + Sync {
    async fn list_holders(&self, tenant_id: u64) -> Result<Vec<Holder>, AppError>;

    /// Applies a partial update, returning whether a row was written.
    async fn update_holder(
        &self,
        user_id: u64,
        tenant_id: u64,
        update: HolderUpdate,
    ) -> Result<bool, AppError>;
}

/// On-chain balance lookups.
///
/// Never fails: transport and RPC errors surface as `BalanceReading::Unknown`.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    async fn get_balance(&self, address: &str, token_mint: &str, rpc_url: &str) -> BalanceReading;
}

/// Discord guild, member and role operations.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Resolves the guild, the bot's member record and the gated role, in that order.
    ///
    /// # Returns
    /// - `Ok(RoleHierarchy)` - Snapshot used to decide whether the bot can manage the role
    /// - `Err(TenantSkip)` - Guild, bot member or role could not be resolved
    async fn resolve_tenant(&self, tenant_id: u64, role_id: u64)
        -> Result<RoleHierarchy, TenantSkip>;

    /// Fetches a member live. `None` covers both "left the guild" and lookup failures.
    async fn resolve_member(&self, tenant_id: u64, user_id: u64) -> Option<GuildMember>;

    async fn grant_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn revoke_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;
}
