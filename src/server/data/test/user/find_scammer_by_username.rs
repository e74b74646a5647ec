use super::*;

/// Tests that a flagged user is found regardless of case.
///
/// Expected: Ok(Some(user))
#[tokio::test]
async fn finds_flagged_user_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).username("Fraudster").scammer(true).build().await?;

    let repo = UserRepository::new(db);
    let found = repo.find_scammer_by_username("fRAUDSTER").await?;

    assert_eq!(found.map(|user| user.username), Some("Fraudster".to_string()));

    Ok(())
}

/// Tests that an existing but unflagged user is not reported.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_unflagged_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).username("honest").build().await?;

    let repo = UserRepository::new(db);

    assert!(repo.find_scammer_by_username("honest").await?.is_none());
    assert!(repo.find_scammer_by_username("missing").await?.is_none());

    Ok(())
}
