use super::*;

/// Tests that client identity and numeric owner identity are unioned.
///
/// One ad matches only by `client_id`, one only by `user_id`, one by both; all three are
/// returned exactly once and an unrelated ad is not.
///
/// Expected: Ok with three ads
#[tokio::test]
async fn unions_client_and_user_identity() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    AdFactory::new(db).client_id("777").user_id(1).build().await?;
    AdFactory::new(db).client_id("other").user_id(777).build().await?;
    AdFactory::new(db).client_id("777").user_id(777).build().await?;
    AdFactory::new(db).client_id("555").user_id(555).build().await?;

    let repo = AdRepository::new(db);
    let key = OwnerKey::parse("777").unwrap();
    let ads = repo.find_by_owner(&key, Utc::now()).await?;

    assert_eq!(ads.len(), 3);
    assert!(ads.iter().all(|ad| ad.client_id == "777" || ad.user_id == 777));

    Ok(())
}

/// Tests that a non-numeric key only matches the client identity.
///
/// Expected: Ok with the single ad recorded under that client id
#[tokio::test]
async fn non_numeric_key_matches_client_id_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ad = AdFactory::new(db).client_id("tg-abc").build().await?;
    AdFactory::new(db).client_id("tg-xyz").build().await?;

    let repo = AdRepository::new(db);
    let key = OwnerKey::parse("tg-abc").unwrap();
    let ads = repo.find_by_owner(&key, Utc::now()).await?;

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].id, ad.id);

    Ok(())
}

/// Tests that owner lookups include every status with derived values.
///
/// Expected: Ok with the stale active ad reported as expired
#[tokio::test]
async fn includes_all_statuses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = AdFactory::new(db)
        .client_id("9")
        .expires_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;
    AdFactory::new(db).client_id("9").status("removed").build().await?;

    let repo = AdRepository::new(db);
    let ads = repo
        .find_by_owner(&OwnerKey::parse("9").unwrap(), Utc::now())
        .await?;

    assert_eq!(ads.len(), 2);
    let stale_view = ads.iter().find(|ad| ad.id == stale.id).unwrap();
    assert_eq!(stale_view.status, AdStatus::Expired);

    Ok(())
}
