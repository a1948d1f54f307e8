//! Discord role hierarchy snapshot.
//!
//! Captures the facts needed to decide whether the bot may grant and revoke the gated
//! role in a guild, independent of serenity's cache types.

use serenity::all::Permissions;

use crate::server::model::reconciliation::TenantSkip;

/// Bot permissions and role positions within one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleHierarchy {
    /// Discord guild ID.
    pub tenant_id: u64,
    /// Gated role ID.
    pub role_id: u64,
    /// Bot's own user ID.
    pub bot_user_id: u64,
    /// Guild owner's user ID.
    pub owner_id: u64,
    /// Union of @everyone and every role the bot holds.
    pub bot_permissions: Permissions,
    /// Highest position among the bot's roles, 0 when it only has @everyone.
    pub bot_highest_position: u16,
    /// Position of the gated role.
    pub role_position: u16,
}

impl RoleHierarchy {
    /// Checks whether the bot may manage the gated role.
    ///
    /// A bot that owns the guild holds every permission and outranks every role.
    /// Otherwise it needs Manage Roles (or Administrator) and the gated role must sit
    /// strictly below the bot's highest role.
    ///
    /// # Returns
    /// - `Ok(())` - Role mutations are expected to succeed
    /// - `Err(TenantSkip::MissingManageRoles)` - Bot lacks the permission
    /// - `Err(TenantSkip::RoleAboveBot)` - Gated role is at or above the bot's highest role
    pub fn check_manageable(&self) -> Result<(), TenantSkip> {
        if self.owner_id == self.bot_user_id {
            return Ok(());
        }

        let can_manage = self.bot_permissions.contains(Permissions::ADMINISTRATOR)
            || self.bot_permissions.contains(Permissions::MANAGE_ROLES);

        if !can_manage {
            return Err(TenantSkip::MissingManageRoles);
        }

        if self.role_position >= self.bot_highest_position {
            return Err(TenantSkip::RoleAboveBot {
                role_position: self.role_position,
                bot_position: self.bot_highest_position,
            });
        }

        Ok(())
    }

    pub fn can_manage_role(&self) -> bool {
        self.check_manageable().is_ok()
    }
}
