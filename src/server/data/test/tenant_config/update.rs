use super::*;
use crate::server::model::tenant_config::TenantConfigUpdate;

/// Tests changing the threshold and role while leaving the rest alone.
///
/// Expected: Ok(true) with only the given fields changed
#[tokio::test]
async fn updates_given_fields_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .role_id("77")
        .required_balance("1000")
        .token_metadata("GATE", 6)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    let written = repo
        .update(
            42,
            TenantConfigUpdate {
                required_balance: Some("5000".to_string()),
                role_id: Some(88),
                ..Default::default()
            },
        )
        .await?;

    assert!(written);

    let tenant = repo.find(42).await?.unwrap();
    assert_eq!(tenant.required_balance, "5000");
    assert_eq!(tenant.role_id, 88);
    assert_eq!(tenant.token_symbol.as_deref(), Some("GATE"));
    assert_eq!(tenant.token_decimals, Some(6));
    assert!(tenant.setup_complete);

    Ok(())
}

/// Tests clearing the token symbol.
///
/// Expected: Ok(true) with the symbol removed and decimals kept
#[tokio::test]
async fn clears_token_symbol() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .token_metadata("GATE", 6)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    repo.update(
        42,
        TenantConfigUpdate {
            token_symbol: Some(None),
            ..Default::default()
        },
    )
    .await?;

    let tenant = repo.find(42).await?.unwrap();
    assert_eq!(tenant.token_symbol, None);
    assert_eq!(tenant.token_decimals, Some(6));

    Ok(())
}

/// Tests an update with no fields set.
///
/// Expected: Ok(false) without a write
#[tokio::test]
async fn skips_empty_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);

    assert!(!repo.update(42, TenantConfigUpdate::default()).await?);

    Ok(())
}

/// Tests updating a guild that never ran setup.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);
    let written = repo
        .update(
            999,
            TenantConfigUpdate {
                rpc_url: Some("https://rpc.example".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert!(!written);

    Ok(())
}
