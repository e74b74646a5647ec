use super::*;

/// Tests total and flagged user counts.
///
/// Expected: Ok with 3 total, 1 flagged
#[tokio::test]
async fn counts_users_and_scammers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).build().await?;
    UserFactory::new(db).build().await?;
    UserFactory::new(db).scammer(true).build().await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.count_all().await?, 3);
    assert_eq!(repo.count_scammers().await?, 1);

    Ok(())
}
