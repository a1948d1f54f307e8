use super::*;

/// Tests listing holders scoped to one tenant.
///
/// Expected: Ok with only the tenant's holders
#[tokio::test]
async fn lists_holders_of_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (tenant, created) = factory::helpers::create_tenant_with_holders(db, 3).await?;
    let (_other_tenant, _other) = factory::helpers::create_tenant_with_holders(db, 2).await?;

    let repo = HolderRepository::new(db);
    let holders = repo
        .list_by_tenant(tenant.server_id.parse().unwrap())
        .await?;

    assert_eq!(holders.len(), created.len());
    assert!(holders
        .iter()
        .all(|h| h.tenant_id.to_string() == tenant.server_id));

    Ok(())
}

/// Tests that stored duplicate addresses are collapsed on read.
///
/// Expected: Ok with de-duplicated addresses in first-seen order
#[tokio::test]
async fn collapses_duplicate_addresses() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    factory::holder::HolderFactory::new(db, &tenant.server_id)
        .addresses(["w2", "w1", "w2"])
        .build()
        .await?;

    let repo = HolderRepository::new(db);
    let holders = repo
        .list_by_tenant(tenant.server_id.parse().unwrap())
        .await?;

    assert_eq!(holders[0].addresses, vec!["w2", "w1"]);

    Ok(())
}

/// Tests that a holder row with malformed address JSON is dropped.
///
/// Expected: Ok with the readable holder only
#[tokio::test]
async fn drops_unreadable_rows() -> Result<(), AppError> {
    use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel};

    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let broken = factory::create_holder(db, &tenant.server_id).await?;
    let healthy = factory::create_holder(db, &tenant.server_id).await?;

    let mut active_model = broken.into_active_model();
    active_model.addresses = ActiveValue::Set(serde_json::json!("not-an-array"));
    active_model.update(db).await?;

    let repo = HolderRepository::new(db);
    let holders = repo
        .list_by_tenant(tenant.server_id.parse().unwrap())
        .await?;

    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].user_id.to_string(), healthy.discord_user_id);

    Ok(())
}

/// Tests listing a tenant without holders.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_without_holders() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;

    let repo = HolderRepository::new(db);
    let holders = repo
        .list_by_tenant(tenant.server_id.parse().unwrap())
        .await?;

    assert!(holders.is_empty());

    Ok(())
}
