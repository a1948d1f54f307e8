//! Tenant configuration repository for database operations.
//!
//! All methods return domain models, converting SeaORM entity models internally.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::tenant_config::{TenantConfig, TenantConfigUpdate, UpsertTenantConfigParam},
};

/// Repository providing database operations for tenant configurations.
pub struct TenantConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TenantConfigRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every tenant whose setup is complete, ordered by guild ID.
    ///
    /// Rows whose stored IDs do not parse are logged and dropped so one corrupt row
    /// cannot stall reconciliation for every other tenant.
    ///
    /// # Returns
    /// - `Ok(Vec<TenantConfig>)` - Completed tenant configurations
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_setup_complete(&self) -> Result<Vec<TenantConfig>, AppError> {
        let entities = entity::prelude::TenantConfig::find()
            .filter(entity::tenant_config::Column::SetupComplete.eq(true))
            .order_by_asc(entity::tenant_config::Column::ServerId)
            .all(self.db)
            .await?;

        let tenants = entities
            .into_iter()
            .filter_map(|entity| {
                let server_id = entity.server_id.clone();
                match TenantConfig::from_entity(entity) {
                    Ok(tenant) => Some(tenant),
                    Err(e) => {
                        tracing::error!(tenant_id = %server_id, "Dropping unreadable tenant config: {}", e);
                        None
                    }
                }
            })
            .collect();

        Ok(tenants)
    }

    /// Finds a tenant by guild ID if its setup is complete.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(TenantConfig))` - Tenant exists and setup is complete
    /// - `Ok(None)` - Tenant missing or setup incomplete
    /// - `Err(AppError)` - Database error or unreadable stored IDs
    pub async fn find_setup_complete(
        &self,
        tenant_id: u64,
    ) -> Result<Option<TenantConfig>, AppError> {
        let entity = entity::prelude::TenantConfig::find_by_id(tenant_id.to_string())
            .filter(entity::tenant_config::Column::SetupComplete.eq(true))
            .one(self.db)
            .await?;

        entity.map(TenantConfig::from_entity).transpose()
    }

    /// Finds a tenant by guild ID whether or not its setup is complete.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(TenantConfig))` - Tenant exists
    /// - `Ok(None)` - Guild never configured gating
    /// - `Err(AppError)` - Database error or unreadable stored IDs
    pub async fn find(&self, tenant_id: u64) -> Result<Option<TenantConfig>, AppError> {
        let entity = entity::prelude::TenantConfig::find_by_id(tenant_id.to_string())
            .one(self.db)
            .await?;

        entity.map(TenantConfig::from_entity).transpose()
    }

    /// Applies a partial update to an existing tenant configuration.
    ///
    /// `admin_user_id`, `server_name` and `setup_complete` are never touched. An empty
    /// update performs no write.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    /// - `update` - Fields to change
    ///
    /// # Returns
    /// - `Ok(true)` - A row was updated
    /// - `Ok(false)` - Nothing to write or no such tenant
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn update(
        &self,
        tenant_id: u64,
        update: TenantConfigUpdate,
    ) -> Result<bool, AppError> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut query = entity::prelude::TenantConfig::update_many()
            .filter(entity::tenant_config::Column::ServerId.eq(tenant_id.to_string()))
            .col_expr(entity::tenant_config::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(token_mint) = update.token_mint {
            query = query.col_expr(
                entity::tenant_config::Column::TokenAddress,
                Expr::value(token_mint),
            );
        }
        if let Some(required_balance) = update.required_balance {
            query = query.col_expr(
                entity::tenant_config::Column::RequiredBalance,
                Expr::value(required_balance),
            );
        }
        if let Some(role_id) = update.role_id {
            query = query.col_expr(
                entity::tenant_config::Column::RoleId,
                Expr::value(role_id.to_string()),
            );
        }
        if let Some(rpc_url) = update.rpc_url {
            query = query.col_expr(entity::tenant_config::Column::RpcUrl, Expr::value(rpc_url));
        }
        if let Some(token_symbol) = update.token_symbol {
            query = query.col_expr(
                entity::tenant_config::Column::TokenSymbol,
                Expr::value(token_symbol),
            );
        }
        if let Some(token_decimals) = update.token_decimals {
            query = query.col_expr(
                entity::tenant_config::Column::TokenDecimals,
                Expr::value(token_decimals as i32),
            );
        }

        let result = query.exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Creates a tenant configuration or replaces the settings of an existing one.
    ///
    /// `created_at` is preserved on update.
    ///
    /// # Arguments
    /// - `param` - Full tenant configuration
    ///
    /// # Returns
    /// - `Ok(TenantConfig)` - The stored configuration
    /// - `Err(AppError)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertTenantConfigParam) -> Result<TenantConfig, AppError> {
        let now = Utc::now();

        let entity = entity::prelude::TenantConfig::insert(entity::tenant_config::ActiveModel {
            server_id: ActiveValue::Set(param.tenant_id.to_string()),
            server_name: ActiveValue::Set(param.server_name),
            token_address: ActiveValue::Set(param.token_mint),
            required_balance: ActiveValue::Set(param.required_balance),
            role_id: ActiveValue::Set(param.role_id.to_string()),
            rpc_url: ActiveValue::Set(param.rpc_url),
            setup_complete: ActiveValue::Set(param.setup_complete),
            admin_user_id: ActiveValue::Set(param.admin_user_id.map(|id| id.to_string())),
            token_symbol: ActiveValue::Set(param.token_symbol),
            token_decimals: ActiveValue::Set(param.token_decimals.map(|d| d as i32)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::tenant_config::Column::ServerId)
                .update_columns([
                    entity::tenant_config::Column::ServerName,
                    entity::tenant_config::Column::TokenAddress,
                    entity::tenant_config::Column::RequiredBalance,
                    entity::tenant_config::Column::RoleId,
                    entity::tenant_config::Column::RpcUrl,
                    entity::tenant_config::Column::SetupComplete,
                    entity::tenant_config::Column::AdminUserId,
                    entity::tenant_config::Column::TokenSymbol,
                    entity::tenant_config::Column::TokenDecimals,
                    entity::tenant_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        TenantConfig::from_entity(entity)
    }
}
