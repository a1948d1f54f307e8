use super::*;

/// Tests finding a holder by its composite key.
///
/// Expected: Ok(Some) with stored fields
#[tokio::test]
async fn finds_holder() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    factory::holder::HolderFactory::new(db, &tenant.server_id)
        .discord_user_id("1001")
        .username("alice")
        .addresses(["WalletA"])
        .active(true)
        .build()
        .await?;

    let repo = HolderRepository::new(db);
    let holder = repo
        .find(1001, tenant.server_id.parse().unwrap())
        .await?
        .unwrap();

    assert_eq!(holder.username, "alice");
    assert_eq!(holder.addresses, vec!["WalletA"]);
    assert!(holder.active);

    Ok(())
}

/// Tests that the same user in another tenant is not returned.
///
/// Expected: Ok(None)
#[tokio::test]
async fn scopes_lookup_to_tenant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let other = factory::create_tenant_config(db).await?;
    factory::holder::HolderFactory::new(db, &tenant.server_id)
        .discord_user_id("1001")
        .build()
        .await?;

    let repo = HolderRepository::new(db);

    assert!(repo
        .find(1001, other.server_id.parse().unwrap())
        .await?
        .is_none());

    Ok(())
}
