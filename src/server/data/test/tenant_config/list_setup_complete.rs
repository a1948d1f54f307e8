use super::*;

/// Tests listing only tenants whose setup is complete.
///
/// Expected: Ok with the incomplete tenant excluded
#[tokio::test]
async fn lists_only_completed_tenants() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let complete = factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("100")
        .build()
        .await?;
    let _incomplete = factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("200")
        .setup_complete(false)
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    let tenants = repo.list_setup_complete().await?;

    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].tenant_id.to_string(), complete.server_id);

    Ok(())
}

/// Tests that a row with an unparseable guild ID is dropped instead of failing the list.
///
/// Expected: Ok with only the readable tenant returned
#[tokio::test]
async fn drops_rows_with_invalid_ids() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("not-a-snowflake")
        .build()
        .await?;
    factory::tenant_config::TenantConfigFactory::new(db)
        .server_id("300")
        .build()
        .await?;

    let repo = TenantConfigRepository::new(db);
    let tenants = repo.list_setup_complete().await?;

    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].tenant_id, 300);

    Ok(())
}

/// Tests listing when no tenant exists.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_without_tenants() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TenantConfigRepository::new(db);
    let tenants = repo.list_setup_complete().await?;

    assert!(tenants.is_empty());

    Ok(())
}
