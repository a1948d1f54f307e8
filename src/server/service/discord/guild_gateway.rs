//! Guild, member and role access backed by serenity's cache and HTTP client.

use async_trait::async_trait;
use serenity::{
    all::{GuildId, Permissions, RoleId, UserId},
    cache::Cache,
    http::Http,
};
use std::{collections::HashMap, sync::Arc};

use crate::server::{
    error::AppError,
    model::{
        discord::{GuildMember, RoleHierarchy},
        reconciliation::TenantSkip,
    },
    service::reconciliation::traits::GuildGateway,
};

/// Permissions and position of one guild role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleSnapshot {
    pub permissions: Permissions,
    pub position: u16,
}

/// Cached guild facts copied out so no cache lock is held across an await.
struct GuildSnapshot {
    owner_id: u64,
    roles: HashMap<u64, RoleSnapshot>,
    bot_role_ids: Option<Vec<u64>>,
}

/// Production `GuildGateway` built from the bot's cache and HTTP client.
#[derive(Clone)]
pub struct SerenityGuildGateway {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityGuildGateway {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    fn snapshot(&self, guild_id: GuildId, bot_user_id: UserId) -> Option<GuildSnapshot> {
        let guild = self.cache.guild(guild_id)?;

        let roles = guild
            .roles
            .iter()
            .map(|(id, role)| {
                (
                    id.get(),
                    RoleSnapshot {
                        permissions: role.permissions,
                        position: role.position,
                    },
                )
            })
            .collect();

        let bot_role_ids = guild
            .members
            .get(&bot_user_id)
            .map(|member| member.roles.iter().map(|r| r.get()).collect());

        Some(GuildSnapshot {
            owner_id: guild.owner_id.get(),
            roles,
            bot_role_ids,
        })
    }
}

#[async_trait]
impl GuildGateway for SerenityGuildGateway {
    async fn resolve_tenant(
        &self,
        tenant_id: u64,
        role_id: u64,
    ) -> Result<RoleHierarchy, TenantSkip> {
        let guild_id = GuildId::new(tenant_id);
        let bot_user_id = self.cache.current_user().id;

        let snapshot = self
            .snapshot(guild_id, bot_user_id)
            .ok_or(TenantSkip::GuildNotFound)?;

        let bot_role_ids = match snapshot.bot_role_ids {
            Some(role_ids) => role_ids,
            None => match self.http.get_member(guild_id, bot_user_id).await {
                Ok(member) => member.roles.iter().map(|r| r.get()).collect(),
                Err(e) => {
                    tracing::warn!(tenant_id, "Failed to fetch bot member: {}", e);
                    return Err(TenantSkip::BotMemberUnavailable);
                }
            },
        };

        build_hierarchy(
            tenant_id,
            role_id,
            bot_user_id.get(),
            snapshot.owner_id,
            &snapshot.roles,
            &bot_role_ids,
        )
    }

    async fn resolve_member(&self, tenant_id: u64, user_id: u64) -> Option<GuildMember> {
        match self
            .http
            .get_member(GuildId::new(tenant_id), UserId::new(user_id))
            .await
        {
            Ok(member) => Some(GuildMember::from_member(&member)),
            Err(e) => {
                tracing::debug!(tenant_id, user_id, "Member not resolved: {}", e);
                None
            }
        }
    }

    async fn grant_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(tenant_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn revoke_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(tenant_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }
}

/// Derives the bot's effective permissions and highest position in a guild.
///
/// The @everyone role shares the guild's ID and contributes its permissions but not its
/// position. Bot roles missing from `roles` are ignored.
///
/// # Returns
/// - `Ok(RoleHierarchy)` - Snapshot for the hierarchy check
/// - `Err(TenantSkip::RoleNotFound)` - Gated role does not exist in the guild
pub fn build_hierarchy(
    tenant_id: u64,
    role_id: u64,
    bot_user_id: u64,
    owner_id: u64,
    roles: &HashMap<u64, RoleSnapshot>,
    bot_role_ids: &[u64],
) -> Result<RoleHierarchy, TenantSkip> {
    let target = roles.get(&role_id).ok_or(TenantSkip::RoleNotFound)?;

    let mut bot_permissions = roles
        .get(&tenant_id)
        .map(|everyone| everyone.permissions)
        .unwrap_or_else(Permissions::empty);
    let mut bot_highest_position = 0;

    for role in bot_role_ids.iter().filter_map(|id| roles.get(id)) {
        bot_permissions |= role.permissions;
        bot_highest_position = bot_highest_position.max(role.position);
    }

    Ok(RoleHierarchy {
        tenant_id,
        role_id,
        bot_user_id,
        owner_id,
        bot_permissions,
        bot_highest_position,
        role_position: target.position,
    })
}
