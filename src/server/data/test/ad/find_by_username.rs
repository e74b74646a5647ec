use super::*;

/// Tests case-insensitive username matching.
///
/// Expected: Ok with both ads published under differently cased names
#[tokio::test]
async fn matches_username_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    AdFactory::new(db).username("Foo").build().await?;
    AdFactory::new(db).username("foo").build().await?;
    AdFactory::new(db).username("foobar").build().await?;

    let repo = AdRepository::new(db);
    let ads = repo.find_by_username("FOO", Utc::now()).await?;

    assert_eq!(ads.len(), 2);
    assert!(ads.iter().all(|ad| ad.username.eq_ignore_ascii_case("foo")));

    Ok(())
}

/// Tests a non-ASCII username looked up with the same spelling and with ASCII case changed.
///
/// Expected: Ok with the ad found both ways
#[tokio::test]
async fn matches_non_ascii_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ad = AdFactory::new(db).username("Ärger").build().await?;

    let repo = AdRepository::new(db);
    let exact = repo.find_by_username("Ärger", Utc::now()).await?;
    let upper = repo.find_by_username("ÄRGER", Utc::now()).await?;

    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].id, ad.id);
    assert_eq!(upper.len(), 1);

    Ok(())
}

/// Tests that an unknown username yields an empty result.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn returns_empty_for_unknown_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    AdFactory::new(db).username("someone").build().await?;

    let repo = AdRepository::new(db);
    let ads = repo.find_by_username("nobody", Utc::now()).await?;

    assert!(ads.is_empty());

    Ok(())
}
