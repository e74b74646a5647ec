use super::*;

/// Tests total, active and premium-active counts.
///
/// Expected: Ok with 4 total, 2 active, 1 premium active
#[tokio::test]
async fn counts_ads_by_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    AdFactory::new(db).build().await?;
    AdFactory::new(db).premium(true).build().await?;
    AdFactory::new(db)
        .premium(true)
        .expires_at(now - Duration::days(2))
        .build()
        .await?;
    AdFactory::new(db).status("removed").build().await?;

    let repo = AdRepository::new(db);

    assert_eq!(repo.count_all().await?, 4);
    assert_eq!(repo.count_active(false, now).await?, 2);
    assert_eq!(repo.count_active(true, now).await?, 1);

    Ok(())
}

/// Tests single-ad lookup by id.
///
/// Expected: Ok(Some) for an existing id, Ok(None) otherwise
#[tokio::test]
async fn finds_ad_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ad = AdFactory::new(db).title("Guitar lessons").build().await?;

    let repo = AdRepository::new(db);
    let found = repo.find_by_id(ad.id, Utc::now()).await?;

    assert_eq!(found.map(|ad| ad.title), Some("Guitar lessons".to_string()));
    assert!(repo.find_by_id(ad.id + 1000, Utc::now()).await?.is_none());

    Ok(())
}
