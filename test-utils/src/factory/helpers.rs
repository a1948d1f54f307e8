//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a completed tenant configuration with `count` default holders.
///
/// # Arguments
/// - `db` - Database connection
/// - `count` - Number of holders to create for the tenant
///
/// # Returns
/// - `Ok((tenant, holders))` - Created tenant and its holders in creation order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_tenant_with_holders(
    db: &DatabaseConnection,
    count: usize,
) -> Result<(entity::tenant_config::Model, Vec<entity::holder::Model>), DbErr> {
    let tenant = crate::factory::tenant_config::create_tenant_config(db).await?;

    let mut holders = Vec::with_capacity(count);
    for _ in 0..count {
        holders.push(crate::factory::holder::create_holder(db, &tenant.server_id).await?);
    }

    Ok((tenant, holders))
}
