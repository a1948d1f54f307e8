use super::*;

/// Tests finding a tenant whose setup is not complete.
///
/// Expected: Ok(Some) with setup_complete false
#[tokio::test]
async fn finds_incomplete_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("42")
        .setup_complete(false)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    let tenant = repo.find(42).await?.unwrap();

    assert_eq!(tenant.tenant_id, 42);
    assert!(!tenant.setup_complete);

    Ok(())
}

/// Tests looking up a guild that never ran setup.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);

    assert!(repo.find(999).await?.is_none());

    Ok(())
}
