use super::*;

/// Tests creating a holder with normalized addresses.
///
/// Expected: Ok with duplicates collapsed
#[tokio::test]
async fn creates_holder() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let tenant_id: u64 = tenant.server_id.parse().unwrap();

    let repo = HolderRepository::new(db);
    let holder = repo
        .upsert(UpsertHolderParam {
            user_id: 1001,
            tenant_id,
            username: "alice".to_string(),
            addresses: vec!["WalletA".to_string(), "WalletA".to_string()],
            active: true,
        })
        .await?;

    assert_eq!(holder.user_id, 1001);
    assert_eq!(holder.tenant_id, tenant_id);
    assert_eq!(holder.addresses, vec!["WalletA"]);
    assert!(holder.active);

    Ok(())
}

/// Tests that upserting an existing holder replaces its fields in place.
///
/// Expected: Ok with new addresses and a single row
#[tokio::test]
async fn replaces_existing_holder() -> Result<(), AppError> {
    use sea_orm::PaginatorTrait;

    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let tenant_id: u64 = tenant.server_id.parse().unwrap();
    factory::holder::HolderFactory::new(db, &tenant.server_id)
        .discord_user_id("1001")
        .addresses(["WalletA"])
        .build()
        .await?;

    let repo = HolderRepository::new(db);
    let holder = repo
        .upsert(UpsertHolderParam {
            user_id: 1001,
            tenant_id,
            username: "alice".to_string(),
            addresses: vec!["WalletA".to_string(), "WalletB".to_string()],
            active: false,
        })
        .await?;

    assert_eq!(holder.addresses, vec!["WalletA", "WalletB"]);
    assert!(!holder.active);

    let count = entity::prelude::Holder::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that a holder cannot be created for an unknown tenant.
///
/// Expected: Err from the foreign key constraint
#[tokio::test]
async fn rejects_unknown_tenant() -> Result<(), AppError> {
    use sea_orm::ConnectionTrait;

    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;

    let repo = HolderRepository::new(db);
    let result = repo
        .upsert(UpsertHolderParam {
            user_id: 1001,
            tenant_id: 999,
            username: "alice".to_string(),
            addresses: vec!["WalletA".to_string()],
            active: false,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
