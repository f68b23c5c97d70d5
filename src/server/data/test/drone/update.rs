use super::*;

/// Tests a partial update.
///
/// Expected: only the supplied field changes; owner and timestamp stay
#[tokio::test]
async fn updates_only_supplied_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _, drone) = helpers::create_drone_with_dependencies(db).await?;

    let updated = DroneRepository::new(db)
        .update(
            UpdateDroneParams {
                id: drone.id,
                name: None,
                category_name: None,
                manufacturing_date: None,
                has_it_competed: Some(true),
            },
            None,
        )
        .await?
        .unwrap();

    assert!(updated.has_it_competed);
    assert_eq!(updated.name, drone.name);
    assert_eq!(updated.owner_id, Some(owner.id));
    assert_eq!(updated.inserted_timestamp, drone.inserted_timestamp);

    Ok(())
}
