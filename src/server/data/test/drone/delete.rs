use super::*;

/// Tests bulk deletion of a category's drones.
///
/// Expected: both drones of the category removed, the other category untouched
#[tokio::test]
async fn deletes_drones_of_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let doomed = factory::create_category(db).await?;
    let kept = factory::create_category(db).await?;
    factory::create_drone(db, doomed.id, None).await?;
    factory::create_drone(db, doomed.id, None).await?;
    let survivor = factory::create_drone(db, kept.id, None).await?;

    let repo = DroneRepository::new(db);
    let ids = repo.ids_by_category(doomed.id).await?;
    assert_eq!(ids.len(), 2);

    let result = repo.delete_many(ids).await?;
    assert_eq!(result.rows_affected, 2);
    assert!(repo.get_by_id(survivor.id).await?.is_some());

    Ok(())
}
