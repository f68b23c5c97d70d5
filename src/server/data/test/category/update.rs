use super::*;

/// Tests renaming and updating a missing category.
///
/// Expected: Some(renamed) for an existing id, None otherwise
#[tokio::test]
async fn updates_category_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;

    let repo = DroneCategoryRepository::new(db);
    let updated = repo
        .update(category.id, Some("Hexacopter".to_string()))
        .await?
        .unwrap();
    assert_eq!(updated.name, "Hexacopter");

    let unchanged = repo.update(category.id, None).await?.unwrap();
    assert_eq!(unchanged.name, "Hexacopter");

    assert!(repo.update(category.id + 100, None).await?.is_none());

    Ok(())
}
