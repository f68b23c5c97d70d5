use super::*;

/// Tests the uniqueness check used before writes.
///
/// Expected: name taken by another category, free when excluding the owner of the name
#[tokio::test]
async fn checks_name_uniqueness() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = DroneCategoryFactory::new(db).name("Quadcopter").build().await?;

    let repo = DroneCategoryRepository::new(db);
    assert!(repo.name_exists("Quadcopter", None).await?);
    assert!(!repo.name_exists("Quadcopter", Some(category.id)).await?);
    assert!(!repo.name_exists("Octocopter", None).await?);

    Ok(())
}

/// Tests that the store rejects duplicate names on its own.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_name_insert() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneCategoryRepository::new(db);
    repo.create(CreateDroneCategoryParams {
        name: "Quadcopter".to_string(),
    })
    .await?;

    let result = repo
        .create(CreateDroneCategoryParams {
            name: "Quadcopter".to_string(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
