//! Holder repository for database operations.
//!
//! Holders are keyed by `(discord_user_id, server_id)`. Addresses are stored as a JSON
//! array and surfaced as a de-duplicated list. Reconciliation never deletes holders.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::holder::{normalize_addresses, Holder, HolderUpdate, UpsertHolderParam},
};

/// Repository providing database operations for token holders.
pub struct HolderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HolderRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every holder of a tenant, ordered by user ID.
    ///
    /// Rows that fail conversion (unparseable IDs, malformed address JSON) are logged
    /// and dropped.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Vec<Holder>)` - Holders of the tenant, empty when there are none
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_by_tenant(&self, tenant_id: u64) -> Result<Vec<Holder>, AppError> {
        let entities = entity::prelude::Holder::find()
            .filter(entity::holder::Column::ServerId.eq(tenant_id.to_string()))
            .order_by_asc(entity::holder::Column::DiscordUserId)
            .all(self.db)
            .await?;

        let holders = entities
            .into_iter()
            .filter_map(|entity| {
                let user_id = entity.discord_user_id.clone();
                match Holder::from_entity(entity) {
                    Ok(holder) => Some(holder),
                    Err(e) => {
                        tracing::error!(
                            tenant_id,
                            user_id = %user_id,
                            "Dropping unreadable holder row: {}",
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(holders)
    }

    /// Finds one holder by user and tenant.
    ///
    /// # Returns
    /// - `Ok(Some(Holder))` - Holder exists
    /// - `Ok(None)` - User never linked a wallet in this tenant
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find(&self, user_id: u64, tenant_id: u64) -> Result<Option<Holder>, AppError> {
        let entity =
            entity::prelude::Holder::find_by_id((user_id.to_string(), tenant_id.to_string()))
                .one(self.db)
                .await?;

        entity.map(Holder::from_entity).transpose()
    }

    /// Applies a partial update to a holder's `active` flag and cached username.
    ///
    /// An empty update performs no write and reports `false`. `updated_at` is refreshed
    /// whenever a write happens.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `tenant_id` - Discord guild ID
    /// - `update` - Fields to change
    ///
    /// # Returns
    /// - `Ok(true)` - A row was updated
    /// - `Ok(false)` - Nothing to write or no such holder
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn update(
        &self,
        user_id: u64,
        tenant_id: u64,
        update: HolderUpdate,
    ) -> Result<bool, AppError> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut query = entity::prelude::Holder::update_many()
            .filter(entity::holder::Column::DiscordUserId.eq(user_id.to_string()))
            .filter(entity::holder::Column::ServerId.eq(tenant_id.to_string()))
            .col_expr(entity::holder::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(active) = update.active {
            query = query.col_expr(entity::holder::Column::Active, Expr::value(active));
        }
        if let Some(username) = update.username {
            query = query.col_expr(entity::holder::Column::Username, Expr::value(username));
        }

        let result = query.exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Creates a holder or replaces the username, addresses and active flag of an existing one.
    ///
    /// Addresses are normalized before they are stored.
    ///
    /// # Returns
    /// - `Ok(Holder)` - The stored holder
    /// - `Err(AppError)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertHolderParam) -> Result<Holder, AppError> {
        let now = Utc::now();
        let addresses = normalize_addresses(param.addresses);

        let entity = entity::prelude::Holder::insert(entity::holder::ActiveModel {
            discord_user_id: ActiveValue::Set(param.user_id.to_string()),
            server_id: ActiveValue::Set(param.tenant_id.to_string()),
            username: ActiveValue::Set(param.username),
            addresses: ActiveValue::Set(serde_json::json!(addresses)),
            active: ActiveValue::Set(param.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                entity::holder::Column::DiscordUserId,
                entity::holder::Column::ServerId,
            ])
            .update_columns([
                entity::holder::Column::Username,
                entity::holder::Column::Addresses,
                entity::holder::Column::Active,
                entity::holder::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Holder::from_entity(entity)
    }
}
