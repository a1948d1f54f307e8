//! Holder domain models and parameters.
//!
//! A holder is a Discord user who linked one or more wallets in a tenant. The `active`
//! flag mirrors whether any linked wallet met the tenant's threshold at the last check.

use crate::server::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// Wallets a user linked in a guild and their last known gate status.
#[derive(Debug, Clone, PartialEq)]
pub struct Holder {
    pub user_id: u64,
    pub tenant_id: u64,
    /// Cached Discord username.
    pub username: String,
    /// Linked wallet addresses, de-duplicated, in link order.
    pub addresses: Vec<String>,
    /// Whether the holder satisfied the threshold as of the last successful check.
    pub active: bool,
}

impl Holder {
    /// Converts an entity model to a holder at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Holder)` - The converted domain model with normalized addresses
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored user or guild ID is not a u64
    /// - `Err(AppError::InternalErr(MalformedAddresses))` - Address column is not a JSON
    ///   array of strings
    pub fn from_entity(entity: entity::holder::Model) -> Result<Self, AppError> {
        let addresses: Vec<String> =
            serde_json::from_value(entity.addresses).map_err(|e| {
                InternalError::MalformedAddresses {
                    user_id: entity.discord_user_id.clone(),
                    tenant_id: entity.server_id.clone(),
                    reason: e.to_string(),
                }
            })?;

        Ok(Self {
            user_id: parse_u64_from_string(entity.discord_user_id)?,
            tenant_id: parse_u64_from_string(entity.server_id)?,
            username: entity.username,
            addresses: normalize_addresses(addresses),
            active: entity.active,
        })
    }
}

/// Partial update of the fields reconciliation is allowed to change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolderUpdate {
    pub active: Option<bool>,
    pub username: Option<String>,
}

impl HolderUpdate {
    /// True when neither field is set, meaning no write is needed.
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.username.is_none()
    }
}

/// Parameters for creating or replacing a holder during wallet linking.
#[derive(Debug, Clone)]
pub struct UpsertHolderParam {
    pub user_id: u64,
    pub tenant_id: u64,
    pub username: String,
    pub addresses: Vec<String>,
    pub active: bool,
}

/// Trims addresses, drops blanks and collapses duplicates while keeping first-seen order.
pub fn normalize_addresses<I, S>(addresses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();

    for address in addresses {
        let address = address.as_ref().trim();
        if address.is_empty() || result.iter().any(|a| a == address) {
            continue;
        }
        result.push(address.to_string());
    }

    result
}
