//! Database-backed implementations of the reconciliation store traits.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{holder::HolderRepository, tenant_config::TenantConfigRepository},
    error::AppError,
    model::{
        holder::{Holder, HolderUpdate},
        tenant_config::TenantConfig,
    },
    service::reconciliation::traits::{HolderStore, TenantConfigStore},
};

/// Owns a connection pool handle so it can live behind an `Arc<dyn ...>` for the
/// lifetime of the scheduler.
#[derive(Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantConfigStore for DatabaseStore {
    async fn list_tenants(&self) -> Result<Vec<TenantConfig>, AppError> {
        TenantConfigRepository::new(&self.db)
            .list_setup_complete()
            .await
    }
}

#[async_trait]
impl HolderStore for DatabaseStore {
    async fn list_holders(&self, tenant_id: u64) -> Result<Vec<Holder>, AppError> {
        HolderRepository::new(&self.db).list_by_tenant(tenant_id).await
    }

    async fn update_holder(
        &self,
        user_id: u64,
        tenant_id: u64,
        update: HolderUpdate,
    ) -> Result<bool, AppError> {
        HolderRepository::new(&self.db)
            .update(user_id, tenant_id, update)
            .await
    }
}
