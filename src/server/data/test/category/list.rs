use super::*;

/// Tests listing categories with their drones.
///
/// Expected: categories ordered by name, drone ids ordered by drone name
#[tokio::test]
async fn lists_categories_with_drones() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let quad = DroneCategoryFactory::new(db).name("Quadcopter").build().await?;
    let octo = DroneCategoryFactory::new(db).name("Octocopter").build().await?;
    let zulu = DroneFactory::new(db, quad.id).name("Zulu").build().await?;
    let alpha = DroneFactory::new(db, quad.id).name("Alpha").build().await?;

    let repo = DroneCategoryRepository::new(db);
    let (categories, total) = repo
        .list(CATEGORY_FILTERS.parse(&params("")).unwrap(), all_rows())
        .await?;

    assert_eq!(total, 2);
    assert_eq!(categories[0].id, octo.id);
    assert!(categories[0].drone_ids.is_empty());
    assert_eq!(categories[1].id, quad.id);
    assert_eq!(categories[1].drone_ids, vec![alpha.id, zulu.id]);

    Ok(())
}

/// Tests that the total ignores pagination.
///
/// Expected: one row returned, total of three
#[tokio::test]
async fn counts_all_matches_when_paginated() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_category(db).await?;
    }

    let repo = DroneCategoryRepository::new(db);
    let (categories, total) = repo
        .list(
            CATEGORY_FILTERS.parse(&params("")).unwrap(),
            PageRequest {
                limit: 1,
                offset: 1,
            },
        )
        .await?;

    assert_eq!(categories.len(), 1);
    assert_eq!(total, 3);

    Ok(())
}
