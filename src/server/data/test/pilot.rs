use super::*;
use crate::server::{
    data::pilot::PilotRepository,
    model::pilot::{CreatePilotParams, UpdatePilotParams},
};
use crate::model::pilot::Gender;
use test_utils::factory::{competition::CompetitionFactory, pilot::PilotFactory};

/// Tests that a pilot carries its competitions with full drones.
///
/// Expected: competitions ordered by distance descending, each with its drone resolved
#[tokio::test]
async fn gets_pilot_with_competitions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, category, drone) = factory::helpers::create_drone_with_dependencies(db).await?;
    let pilot = factory::create_pilot(db).await?;
    let short = CompetitionFactory::new(db, pilot.id, drone.id)
        .distance_in_feet(500)
        .build()
        .await?;
    let long = CompetitionFactory::new(db, pilot.id, drone.id)
        .distance_in_feet(900)
        .build()
        .await?;

    let result = PilotRepository::new(db).get_by_id(pilot.id).await?.unwrap();

    let ids: Vec<i32> = result.competitions.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![long.id, short.id]);
    assert_eq!(result.competitions[0].drone.name, drone.name);
    assert_eq!(result.competitions[0].drone.category_name, category.name);

    Ok(())
}

/// Tests gender and races count filters.
///
/// Expected: only the female pilot with five races
#[tokio::test]
async fn filters_by_gender_and_races() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let match_ = PilotFactory::new(db).gender("F").races_count(5).build().await?;
    PilotFactory::new(db).gender("F").races_count(3).build().await?;
    PilotFactory::new(db).gender("M").races_count(5).build().await?;

    let query = PILOT_FILTERS
        .parse(&params("gender=F&races_count=5"))
        .unwrap();
    let (pilots, total) = PilotRepository::new(db).list(query, all_rows()).await?;

    assert_eq!(total, 1);
    assert_eq!(pilots[0].id, match_.id);
    assert_eq!(pilots[0].gender, Gender::Female);

    Ok(())
}

/// Tests creating and partially updating a pilot.
///
/// Expected: gender stored as its code; races count updated, name kept
#[tokio::test]
async fn creates_and_updates_pilot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PilotRepository::new(db);
    let pilot = repo
        .create(
            CreatePilotParams {
                name: "Penelope Pitstop".to_string(),
                gender: Gender::Female,
                races_count: 20,
            },
            Utc::now(),
        )
        .await?;
    assert_eq!(pilot.gender, "F");

    let updated = repo
        .update(UpdatePilotParams {
            id: pilot.id,
            name: None,
            gender: None,
            races_count: Some(21),
        })
        .await?
        .unwrap();

    assert_eq!(updated.races_count, 21);
    assert_eq!(updated.name, "Penelope Pitstop");
    assert!(repo.name_exists("Penelope Pitstop", None).await?);
    assert!(repo.find_by_name("Penelope Pitstop").await?.is_some());

    Ok(())
}
