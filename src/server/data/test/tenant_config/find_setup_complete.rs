use super::*;

/// Tests finding a completed tenant by guild ID.
///
/// Expected: Ok(Some) with the stored settings
#[tokio::test]
async fn finds_completed_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .role_id("77")
        .required_balance("200000")
        .token_metadata("GATE", 6)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    let tenant = repo.find_setup_complete(42).await?.unwrap();

    assert_eq!(tenant.tenant_id, 42);
    assert_eq!(tenant.role_id, 77);
    assert_eq!(tenant.required_balance, "200000");
    assert_eq!(tenant.token_decimals, Some(6));

    Ok(())
}

/// Tests that an incomplete tenant is not returned.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_incomplete_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .setup_complete(false)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);

    assert!(repo.find_setup_complete(42).await?.is_none());

    Ok(())
}

/// Tests looking up a guild that never configured gating.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);

    assert!(repo.find_setup_complete(999).await?.is_none());

    Ok(())
}
