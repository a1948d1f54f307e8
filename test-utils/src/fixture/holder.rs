//! Holder fixtures for creating in-memory test data.

use chrono::Utc;
use entity::holder;

/// Default test Discord user ID.
pub const DEFAULT_DISCORD_USER_ID: &str = "123456789";

/// Default test username.
pub const DEFAULT_USERNAME: &str = "holder";

/// Default linked wallet.
pub const DEFAULT_ADDRESS: &str = "WalletA";

/// Creates an inactive holder model in the default fixture tenant.
///
/// # Returns
/// - `holder::Model` - In-memory holder entity
pub fn entity() -> holder::Model {
    entity_builder().build()
}

/// Creates a holder entity builder for customization.
pub fn entity_builder() -> HolderEntityBuilder {
    HolderEntityBuilder::default()
}

/// Builder for creating customized holder models.
///
/// `addresses_json` writes the stored JSON verbatim, so tests can exercise
/// malformed address columns.
pub struct HolderEntityBuilder {
    discord_user_id: String,
    server_id: String,
    username: String,
    addresses: serde_json::Value,
    active: bool,
}

impl Default for HolderEntityBuilder {
    fn default() -> Self {
        Self {
            discord_user_id: DEFAULT_DISCORD_USER_ID.to_string(),
            server_id: crate::fixture::tenant_config::DEFAULT_SERVER_ID.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            addresses: serde_json::json!([DEFAULT_ADDRESS]),
            active: false,
        }
    }
}

impl HolderEntityBuilder {
    /// Sets the Discord user ID.
    pub fn discord_user_id(mut self, discord_user_id: impl Into<String>) -> Self {
        self.discord_user_id = discord_user_id.into();
        self
    }

    /// Sets the guild ID.
    pub fn server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = server_id.into();
        self
    }

    /// Sets the stored username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Replaces the linked wallet addresses.
    pub fn addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        self.addresses = serde_json::json!(addresses);
        self
    }

    /// Sets the raw JSON stored in the addresses column.
    pub fn addresses_json(mut self, addresses: serde_json::Value) -> Self {
        self.addresses = addresses;
        self
    }

    /// Sets the stored active flag.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds the holder model.
    pub fn build(self) -> holder::Model {
        let now = Utc::now();
        holder::Model {
            discord_user_id: self.discord_user_id,
            server_id: self.server_id,
            username: self.username,
            addresses: self.addresses,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}
