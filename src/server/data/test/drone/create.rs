use super::*;

/// Tests creating a drone records the owner and timestamp.
///
/// Expected: Ok(model) with owner and category set
#[tokio::test]
async fn creates_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = UserFactory::new(db).username("alice").build().await?;
    let category = factory::create_category(db).await?;
    let now = Utc::now();

    let drone = DroneRepository::new(db)
        .create(
            CreateDroneParams {
                name: "Falcon".to_string(),
                category_name: category.name.clone(),
                manufacturing_date: Utc.with_ymd_and_hms(2017, 10, 1, 0, 0, 0).unwrap(),
                has_it_competed: false,
                owner_id: owner.id,
            },
            category.id,
            now,
        )
        .await?;

    assert_eq!(drone.owner_id, Some(owner.id));
    assert_eq!(drone.drone_category_id, category.id);
    assert_eq!(drone.inserted_timestamp.timestamp(), now.timestamp());

    Ok(())
}
