//! Outcome types of the reconciliation loop.

use std::fmt;

/// Whether a holder is entitled to the gated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// At least one linked wallet holds the required balance.
    Eligible,
    /// Every linked wallet was read and none holds the required balance.
    Ineligible,
    /// No wallet met the threshold and at least one reading failed.
    Unknown,
}

impl Eligibility {
    /// The `active` value this eligibility implies, or `None` when it cannot be decided.
    pub fn as_active(self) -> Option<bool> {
        match self {
            Self::Eligible => Some(true),
            Self::Ineligible => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Why a tenant was left untouched for a tick.
///
/// Every variant is a configuration or permission problem that is retried on the next
/// tick without any automatic repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSkip {
    /// Stored threshold is empty, negative or not an integer.
    InvalidRequiredBalance(String),
    /// Bot is not in the guild or the guild is not cached yet.
    GuildNotFound,
    /// Bot's own member record could not be resolved.
    BotMemberUnavailable,
    /// Configured role no longer exists in the guild.
    RoleNotFound,
    /// Bot has neither Manage Roles nor Administrator.
    MissingManageRoles,
    /// Gated role sits at or above the bot's highest role.
    RoleAboveBot { role_position: u16, bot_position: u16 },
    /// Holder list could not be read.
    HolderFetchFailed,
    /// Tenant has no holders.
    NoHolders,
}

impl fmt::Display for TenantSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequiredBalance(reason) => {
                write!(f, "invalid required balance: {}", reason)
            }
            Self::GuildNotFound => write!(f, "guild not found in cache"),
            Self::BotMemberUnavailable => write!(f, "bot member unavailable"),
            Self::RoleNotFound => write!(f, "configured role not found"),
            Self::MissingManageRoles => write!(f, "bot lacks Manage Roles permission"),
            Self::RoleAboveBot {
                role_position,
                bot_position,
            } => write!(
                f,
                "role position {} is not below bot's highest role position {}",
                role_position, bot_position
            ),
            Self::HolderFetchFailed => write!(f, "failed to list holders"),
            Self::NoHolders => write!(f, "no holders"),
        }
    }
}

/// Role mutation performed (or attempted) for one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Granted,
    Revoked,
    GrantFailed,
    RevokeFailed,
}

/// What happened to one holder during convergence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderOutcome {
    /// Membership could not be resolved.
    pub left_guild: bool,
    /// `None` when the holder left the guild and no eligibility was computed.
    pub eligibility: Option<Eligibility>,
    pub role_change: Option<RoleChange>,
    /// A store write touched a row.
    pub persisted: bool,
    /// The store write was attempted and failed; retried next tick.
    pub write_failed: bool,
}
