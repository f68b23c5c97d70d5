use super::*;
use crate::server::{
    model::category::{CreateDroneCategoryParams, UpdateDroneCategoryParams},
    service::category::DroneCategoryService,
};

/// Tests that duplicate names are rejected before the insert.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_duplicate_category_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_category(db).await?;

    let result = DroneCategoryService::new(db)
        .create(CreateDroneCategoryParams {
            name: existing.name,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that blank names are rejected.
///
/// Expected: Err(AppError::BadRequest), nothing persisted
#[tokio::test]
async fn rejects_blank_category_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = DroneCategoryService::new(db)
        .create(CreateDroneCategoryParams {
            name: "  ".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(entity::prelude::DroneCategory::find().count(db).await?, 0);

    Ok(())
}

/// Tests that keeping the current name is not a conflict.
///
/// Expected: Ok(Some(category)) with the same name
#[tokio::test]
async fn allows_update_to_same_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;

    let updated = DroneCategoryService::new(db)
        .update(UpdateDroneCategoryParams {
            id: category.id,
            name: Some(category.name.clone()),
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, category.name);

    Ok(())
}

/// Tests that deleting a category removes its drones and their competitions.
///
/// Expected: true, with no drones or competitions left
#[tokio::test]
async fn deletes_category_with_drones_and_competitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (drone, _, _) = factory::helpers::create_competition_with_dependencies(db).await?;

    let service = DroneCategoryService::new(db);
    assert!(service.delete(drone.drone_category_id).await?);

    assert_eq!(entity::prelude::Drone::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Competition::find().count(db).await?, 0);
    assert!(service.get_by_id(drone.drone_category_id).await?.is_none());

    Ok(())
}

/// Tests deleting an unknown category.
///
/// Expected: false
#[tokio::test]
async fn delete_reports_missing_category() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!DroneCategoryService::new(db).delete(42).await?);

    Ok(())
}
