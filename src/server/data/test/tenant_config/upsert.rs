use super::*;

fn param(required_balance: &str) -> UpsertTenantConfigParam {
    UpsertTenantConfigParam {
        tenant_id: 42,
        server_name: "Gated Guild".to_string(),
        token_mint: "MintA".to_string(),
        required_balance: required_balance.to_string(),
        role_id: 77,
        rpc_url: "http://localhost:8899".to_string(),
        setup_complete: true,
        admin_user_id: Some(5),
        token_symbol: Some("GATE".to_string()),
        token_decimals: Some(6),
    }
}

/// Tests creating a new tenant configuration.
///
/// Expected: Ok with all fields stored
#[tokio::test]
async fn creates_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);
    let tenant = repo.upsert(param("1000")).await?;

    assert_eq!(tenant.tenant_id, 42);
    assert_eq!(tenant.server_name, "Gated Guild");
    assert_eq!(tenant.required_balance, "1000");
    assert!(tenant.setup_complete);

    Ok(())
}

/// Tests that upserting an existing tenant replaces its settings and keeps one row.
///
/// Expected: Ok with new threshold and a single stored row
#[tokio::test]
async fn replaces_existing_tenant() -> Result<(), AppError> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);
    let first = repo.upsert(param("1000")).await?;
    let second = repo.upsert(param("5000")).await?;

    assert_eq!(first.tenant_id, second.tenant_id);
    assert_eq!(second.required_balance, "5000");

    let count = entity::prelude::TenantConfig::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
