use super::*;

/// Tests that a drone resolves its category and owner names.
///
/// Expected: Some(Drone) with category name and owner username
#[tokio::test]
async fn gets_drone_with_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, category, drone) = helpers::create_drone_with_dependencies(db).await?;

    let result = DroneRepository::new(db).get_by_id(drone.id).await?.unwrap();

    assert_eq!(result.name, drone.name);
    assert_eq!(result.category_name, category.name);
    assert_eq!(result.owner_id, Some(owner.id));
    assert_eq!(result.owner_username, Some(owner.username));

    Ok(())
}

/// Tests a drone without owner.
///
/// Expected: owner fields are None
#[tokio::test]
async fn gets_unowned_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let drone = factory::create_drone(db, category.id, None).await?;

    let result = DroneRepository::new(db).get_by_id(drone.id).await?.unwrap();

    assert_eq!(result.owner_id, None);
    assert_eq!(result.owner_username, None);

    Ok(())
}
