use super::*;

/// Tests that expired-but-unflushed rows are excluded.
///
/// Verifies that an ad whose stored status is still `active` but whose expiration has
/// passed never appears in the active feed, alongside stored `expired`/`removed` rows.
///
/// Expected: Ok with only the live ad
#[tokio::test]
async fn excludes_ads_that_are_not_effectively_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let live = AdFactory::new(db).build().await?;
    AdFactory::new(db)
        .expires_at(Utc::now() - Duration::days(1))
        .build()
        .await?;
    AdFactory::new(db).status("expired").build().await?;
    AdFactory::new(db).status("removed").build().await?;

    let repo = AdRepository::new(db);
    let ads = repo.find_active(&ListAdsFilter::default(), Utc::now()).await?;

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].id, live.id);
    assert_eq!(ads[0].status, AdStatus::Active);

    Ok(())
}

/// Tests ordering by premium flag first, then recency.
///
/// Expected: Ok with [premium, newest regular, oldest regular]
#[tokio::test]
async fn orders_premium_first_then_recency() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let old = AdFactory::new(db)
        .updated_at(now - Duration::hours(3))
        .build()
        .await?;
    let premium = AdFactory::new(db)
        .premium(true)
        .updated_at(now - Duration::hours(5))
        .build()
        .await?;
    let recent = AdFactory::new(db)
        .updated_at(now - Duration::hours(1))
        .build()
        .await?;

    let repo = AdRepository::new(db);
    let ids: Vec<i32> = repo
        .find_active(&ListAdsFilter::default(), now)
        .await?
        .into_iter()
        .map(|ad| ad.id)
        .collect();

    assert_eq!(ids, vec![premium.id, recent.id, old.id]);

    Ok(())
}

/// Tests category, mode and tag filtering.
///
/// Expected: Ok with only the ad matching all three
#[tokio::test]
async fn applies_category_mode_and_tag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let matching = AdFactory::new(db)
        .category("trade")
        .mode("sell")
        .tag("gaming")
        .build()
        .await?;
    AdFactory::new(db)
        .category("trade")
        .mode("buy")
        .tag("gaming")
        .build()
        .await?;
    AdFactory::new(db)
        .category("trade")
        .mode("sell")
        .tag("music")
        .build()
        .await?;
    AdFactory::new(db).category("services").build().await?;

    let repo = AdRepository::new(db);
    let filter = ListAdsFilter::new(Some("trade"), Some("sell"), Some("gaming"));
    let ads = repo.find_active(&filter, Utc::now()).await?;

    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].id, matching.id);

    Ok(())
}

/// Tests that the `other` category ignores the requested mode.
///
/// Expected: Ok with both `other` ads regardless of their mode
#[tokio::test]
async fn other_category_ignores_mode() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    AdFactory::new(db).category("other").mode("general").build().await?;
    AdFactory::new(db).category("other").mode("sell").build().await?;

    let repo = AdRepository::new(db);
    let filter = ListAdsFilter::new(Some("other"), Some("buy"), Some("all"));
    let ads = repo.find_active(&filter, Utc::now()).await?;

    assert_eq!(ads.len(), 2);

    Ok(())
}
