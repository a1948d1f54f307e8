//! Tenant configuration factory for creating test tenant entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tenant configurations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::tenant_config::TenantConfigFactory;
///
/// let tenant = TenantConfigFactory::new(&db)
///     .server_id("123456789")
///     .required_balance("1000")
///     .setup_complete(false)
///     .build()
///     .await?;
/// ```
pub struct TenantConfigFactory<'a> {
    db: &'a DatabaseConnection,
    server_id: String,
    server_name: String,
    token_address: String,
    required_balance: String,
    role_id: String,
    rpc_url: String,
    setup_complete: bool,
    token_symbol: Option<String>,
    token_decimals: Option<i32>,
}

impl<'a> TenantConfigFactory<'a> {
    /// Creates a new TenantConfigFactory with default values.
    ///
    /// Defaults:
    /// - server_id: `"{id}"` where id is auto-incremented
    /// - server_name: `"Server {id}"`
    /// - token_address: `"Mint{id}"`
    /// - required_balance: `"1"`
    /// - role_id: `"{id + 500000}"`
    /// - rpc_url: `"http://localhost:8899"`
    /// - setup_complete: `true`
    /// - token_symbol / token_decimals: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `TenantConfigFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            server_id: id.to_string(),
            server_name: format!("Server {}", id),
            token_address: format!("Mint{}", id),
            required_balance: "1".to_string(),
            role_id: (id + 500_000).to_string(),
            rpc_url: "http://localhost:8899".to_string(),
            setup_complete: true,
            token_symbol: None,
            token_decimals: None,
        }
    }

    /// Sets the Discord guild ID the tenant is keyed by.
    pub fn server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = server_id.into();
        self
    }

    /// Sets the display name of the guild.
    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = server_name.into();
        self
    }

    /// Sets the token mint address.
    pub fn token_address(mut self, token_address: impl Into<String>) -> Self {
        self.token_address = token_address.into();
        self
    }

    /// Sets the required raw balance string.
    ///
    /// Stored as-is so tests can insert malformed values.
    pub fn required_balance(mut self, required_balance: impl Into<String>) -> Self {
        self.required_balance = required_balance.into();
        self
    }

    /// Sets the Discord role ID granted to eligible holders.
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Sets the RPC endpoint used for balance lookups.
    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Sets whether setup has been completed for the tenant.
    pub fn setup_complete(mut self, setup_complete: bool) -> Self {
        self.setup_complete = setup_complete;
        self
    }

    /// Sets display metadata for the token.
    ///
    /// # Arguments
    /// - `symbol` - Ticker symbol shown to users
    /// - `decimals` - Decimal places used when formatting raw amounts
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn token_metadata(mut self, symbol: impl Into<String>, decimals: i32) -> Self {
        self.token_symbol = Some(symbol.into());
        self.token_decimals = Some(decimals);
        self
    }

    /// Builds and inserts the tenant configuration into the database.
    ///
    /// # Returns
    /// - `Ok(entity::tenant_config::Model)` - Created tenant configuration
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::tenant_config::Model, DbErr> {
        let now = Utc::now();
        entity::tenant_config::ActiveModel {
            server_id: ActiveValue::Set(self.server_id),
            server_name: ActiveValue::Set(self.server_name),
            token_address: ActiveValue::Set(self.token_address),
            required_balance: ActiveValue::Set(self.required_balance),
            role_id: ActiveValue::Set(self.role_id),
            rpc_url: ActiveValue::Set(self.rpc_url),
            setup_complete: ActiveValue::Set(self.setup_complete),
            admin_user_id: ActiveValue::Set(None),
            token_symbol: ActiveValue::Set(self.token_symbol),
            token_decimals: ActiveValue::Set(self.token_decimals),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a completed tenant configuration with default values.
///
/// Shorthand for `TenantConfigFactory::new(db).build().await`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::tenant_config::Model)` - Created tenant configuration
/// - `Err(DbErr)` - Database error during insert
pub async fn create_tenant_config(
    db: &DatabaseConnection,
) -> Result<entity::tenant_config::Model, DbErr> {
    TenantConfigFactory::new(db).build().await
}
