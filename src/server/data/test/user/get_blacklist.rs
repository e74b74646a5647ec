use super::*;

/// Tests that only flagged users are listed, alphabetically.
///
/// Expected: Ok with ["alice", "mallory", "zed"]
#[tokio::test]
async fn lists_flagged_users_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).username("zed").scammer(true).build().await?;
    UserFactory::new(db).username("bob").build().await?;
    UserFactory::new(db).username("alice").scammer(true).build().await?;
    UserFactory::new(db).username("mallory").scammer(true).build().await?;

    let repo = UserRepository::new(db);
    let names: Vec<String> = repo
        .get_blacklist()
        .await?
        .into_iter()
        .map(|user| user.username)
        .collect();

    assert_eq!(names, vec!["alice", "mallory", "zed"]);

    Ok(())
}

/// Tests the empty blacklist.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn returns_empty_without_flagged_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).build().await?;

    let repo = UserRepository::new(db);

    assert!(repo.get_blacklist().await?.is_empty());

    Ok(())
}
