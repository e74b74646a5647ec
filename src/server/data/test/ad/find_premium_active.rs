use super::*;

/// Tests that only premium ads are returned, ordered by recency alone.
///
/// Expected: Ok with the two live premium ads, newest first
#[tokio::test]
async fn returns_premium_ads_by_recency() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = AdFactory::new(db)
        .premium(true)
        .updated_at(now - Duration::hours(2))
        .build()
        .await?;
    let newer = AdFactory::new(db)
        .premium(true)
        .updated_at(now - Duration::minutes(5))
        .build()
        .await?;
    AdFactory::new(db).build().await?;
    AdFactory::new(db)
        .premium(true)
        .expires_at(now - Duration::minutes(1))
        .build()
        .await?;

    let repo = AdRepository::new(db);
    let ids: Vec<i32> = repo
        .find_premium_active(&ListAdsFilter::default(), now)
        .await?
        .into_iter()
        .map(|ad| ad.id)
        .collect();

    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests that premium ads obey the same filter as the general query.
///
/// Expected: Ok with only the premium ad in the requested category
#[tokio::test]
async fn applies_the_listing_filter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let wanted = AdFactory::new(db)
        .premium(true)
        .category("services")
        .build()
        .await?;
    AdFactory::new(db).premium(true).category("trade").build().await?;

    let repo = AdRepository::new(db);
    let filter = ListAdsFilter::new(Some("services"), None, None);
    let ads = repo.find_premium_active(&filter, Utc::now()).await?;

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].id, wanted.id);

    Ok(())
}
