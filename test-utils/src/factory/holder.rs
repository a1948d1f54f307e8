//! Holder factory for creating test holder entities.
//!
//! Holders belong to a tenant configuration, so the tenant must be created first.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test holders with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::holder::HolderFactory;
///
/// let holder = HolderFactory::new(&db, &tenant.server_id)
///     .discord_user_id("1001")
///     .username("alice")
///     .addresses(["WalletA"])
///     .active(true)
///     .build()
///     .await?;
/// ```
pub struct HolderFactory<'a> {
    db: &'a DatabaseConnection,
    discord_user_id: String,
    server_id: String,
    username: String,
    addresses: Vec<String>,
    active: bool,
}

impl<'a> HolderFactory<'a> {
    /// Creates a new HolderFactory with default values.
    ///
    /// Defaults:
    /// - discord_user_id: `"{id}"` where id is auto-incremented
    /// - username: `"holder{id}"`
    /// - addresses: `["Wallet{id}"]`
    /// - active: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `server_id` - Guild ID of an existing tenant configuration
    ///
    /// # Returns
    /// - `HolderFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, server_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            discord_user_id: id.to_string(),
            server_id: server_id.to_string(),
            username: format!("holder{}", id),
            addresses: vec![format!("Wallet{}", id)],
            active: false,
        }
    }

    /// Sets the Discord user ID of the holder.
    pub fn discord_user_id(mut self, discord_user_id: impl Into<String>) -> Self {
        self.discord_user_id = discord_user_id.into();
        self
    }

    /// Sets the stored username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Replaces the linked wallet addresses.
    ///
    /// # Arguments
    /// - `addresses` - Wallet addresses in the order they were linked
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addresses = addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the stored active flag.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds and inserts the holder entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::holder::Model)` - Created holder entity
    /// - `Err(DbErr)` - Database error during insert (e.g. unknown tenant)
    pub async fn build(self) -> Result<entity::holder::Model, DbErr> {
        let now = Utc::now();
        entity::holder::ActiveModel {
            discord_user_id: ActiveValue::Set(self.discord_user_id),
            server_id: ActiveValue::Set(self.server_id),
            username: ActiveValue::Set(self.username),
            addresses: ActiveValue::Set(serde_json::json!(self.addresses)),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an inactive holder with one default wallet.
///
/// Shorthand for `HolderFactory::new(db, server_id).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `server_id` - Guild ID of an existing tenant configuration
///
/// # Returns
/// - `Ok(entity::holder::Model)` - Created holder entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_holder(
    db: &DatabaseConnection,
    server_id: &str,
) -> Result<entity::holder::Model, DbErr> {
    HolderFactory::new(db, server_id).build().await
}
