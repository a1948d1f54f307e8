//! Tenant configuration fixtures for creating in-memory test data.

use chrono::Utc;
use entity::tenant_config;

/// Default test guild ID.
pub const DEFAULT_SERVER_ID: &str = "987654321";

/// Default test role ID granted to eligible holders.
pub const DEFAULT_ROLE_ID: &str = "555555555";

/// Default token mint address.
pub const DEFAULT_TOKEN_ADDRESS: &str = "So11111111111111111111111111111111111111112";

/// Default required raw balance.
pub const DEFAULT_REQUIRED_BALANCE: &str = "1000";

/// Default RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

/// Creates a completed tenant configuration model with default values.
///
/// # Default Values
/// - server_id: `"987654321"`
/// - server_name: `"Test Server"`
/// - token_address: `"So111...112"`
/// - required_balance: `"1000"`
/// - role_id: `"555555555"`
/// - rpc_url: `"http://localhost:8899"`
/// - setup_complete: `true`
///
/// # Returns
/// - `tenant_config::Model` - In-memory tenant configuration entity
pub fn entity() -> tenant_config::Model {
    entity_builder().build()
}

/// Creates a tenant configuration entity builder for customization.
///
/// # Example
///
/// ```rust,ignore
/// let tenant = fixture::tenant_config::entity_builder()
///     .required_balance("-5")
///     .build();
/// ```
pub fn entity_builder() -> TenantConfigEntityBuilder {
    TenantConfigEntityBuilder::default()
}

/// Builder for creating customized tenant configuration models.
pub struct TenantConfigEntityBuilder {
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

impl Default for TenantConfigEntityBuilder {
    fn default() -> Self {
        Self {
            server_id: DEFAULT_SERVER_ID.to_string(),
            server_name: "Test Server".to_string(),
            token_address: DEFAULT_TOKEN_ADDRESS.to_string(),
            required_balance: DEFAULT_REQUIRED_BALANCE.to_string(),
            role_id: DEFAULT_ROLE_ID.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            setup_complete: true,
            token_symbol: None,
            token_decimals: None,
        }
    }
}

impl TenantConfigEntityBuilder {
    /// Sets the guild ID.
    pub fn server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = server_id.into();
        self
    }

    /// Sets the token mint address.
    pub fn token_address(mut self, token_address: impl Into<String>) -> Self {
        self.token_address = token_address.into();
        self
    }

    /// Sets the required raw balance string.
    pub fn required_balance(mut self, required_balance: impl Into<String>) -> Self {
        self.required_balance = required_balance.into();
        self
    }

    /// Sets the gated role ID.
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Sets whether setup is complete.
    pub fn setup_complete(mut self, setup_complete: bool) -> Self {
        self.setup_complete = setup_complete;
        self
    }

    /// Sets the token symbol and decimals.
    pub fn token_metadata(mut self, symbol: impl Into<String>, decimals: i32) -> Self {
        self.token_symbol = Some(symbol.into());
        self.token_decimals = Some(decimals);
        self
    }

    /// Builds the tenant configuration model.
    pub fn build(self) -> tenant_config::Model {
        let now = Utc::now();
        tenant_config::Model {
            server_id: self.server_id,
            server_name: self.server_name,
            token_address: self.token_address,
            required_balance: self.required_balance,
            role_id: self.role_id,
            rpc_url: self.rpc_url,
            setup_complete: self.setup_complete,
            admin_user_id: None,
            token_symbol: self.token_symbol,
            token_decimals: self.token_decimals,
            created_at: now,
            updated_at: now,
        }
    }
}
