use super::*;

/// Tests updating only the active flag.
///
/// Expected: Ok(true) with username unchanged
#[tokio::test]
async fn updates_active_flag() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let holder = factory::holder::HolderFactory::new(db, &tenant.server_id)
        .username("alice")
        .active(true)
        .build()
        .await?;

    let repo = HolderRepository::new(db);
    let written = repo
        .update(
            holder.discord_user_id.parse().unwrap(),
            tenant.server_id.parse().unwrap(),
            HolderUpdate {
                active: Some(false),
                username: None,
            },
        )
        .await?;

    assert!(written);

    let stored = entity::prelude::Holder::find_by_id((
        holder.discord_user_id.clone(),
        tenant.server_id.clone(),
    ))
    .one(db)
    .await?
    .unwrap();
    assert!(!stored.active);
    assert_eq!(stored.username, "alice");

    Ok(())
}

/// Tests updating active flag and username together.
///
/// Expected: Ok(true) with both fields changed
#[tokio::test]
async fn updates_active_and_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let holder = factory::holder::HolderFactory::new(db, &tenant.server_id)
        .username("old-name")
        .build()
        .await?;

    let repo = HolderRepository::new(db);
    repo.update(
        holder.discord_user_id.parse().unwrap(),
        tenant.server_id.parse().unwrap(),
        HolderUpdate {
            active: Some(true),
            username: Some("new-name".to_string()),
        },
    )
    .await?;

    let stored = entity::prelude::Holder::find_by_id((
        holder.discord_user_id.clone(),
        tenant.server_id.clone(),
    ))
    .one(db)
    .await?
    .unwrap();
    assert!(stored.active);
    assert_eq!(stored.username, "new-name");

    Ok(())
}

/// Tests that an empty update performs no write.
///
/// Expected: Ok(false) with updated_at unchanged
#[tokio::test]
async fn skips_empty_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;
    let holder = factory::create_holder(db, &tenant.server_id).await?;
    let key = (holder.discord_user_id.clone(), tenant.server_id.clone());
    let before = entity::prelude::Holder::find_by_id(key.clone())
        .one(db)
        .await?
        .unwrap();

    let repo = HolderRepository::new(db);
    let written = repo
        .update(
            holder.discord_user_id.parse().unwrap(),
            tenant.server_id.parse().unwrap(),
            HolderUpdate::default(),
        )
        .await?;

    assert!(!written);

    let after = entity::prelude::Holder::find_by_id(key).one(db).await?.unwrap();
    assert_eq!(after, before);

    Ok(())
}

/// Tests updating a holder that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_holder() -> Result<(), AppError> {
    let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tenant = factory::create_tenant_config(db).await?;

    let repo = HolderRepository::new(db);
    let written = repo
        .update(
            424242,
            tenant.server_id.parse().unwrap(),
            HolderUpdate {
                active: Some(true),
                username: None,
            },
        )
        .await?;

    assert!(!written);

    Ok(())
}
