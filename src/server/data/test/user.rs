use super::*;
use crate::server::data::user::UserRepository;
use test_utils::factory::{drone::DroneFactory, user::UserFactory};

/// Tests token lookup.
///
/// Expected: Some(user) for a known token, None otherwise
#[tokio::test]
async fn finds_user_by_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).token("secret-key").build().await?;

    let repo = UserRepository::new(db);
    assert_eq!(repo.find_by_token("secret-key").await?.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_token("unknown").await?.is_none());

    Ok(())
}

/// Tests that users list the drones they own.
///
/// Expected: owned drones ordered by name; other users' drones excluded
#[tokio::test]
async fn gets_user_with_owned_drones() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;
    let zulu = DroneFactory::new(db, category.id)
        .name("Zulu")
        .owner(Some(owner.id))
        .build()
        .await?;
    let alpha = DroneFactory::new(db, category.id)
        .name("Alpha")
        .owner(Some(owner.id))
        .build()
        .await?;
    factory::create_drone(db, category.id, Some(other.id)).await?;

    let user = UserRepository::new(db).get_by_id(owner.id).await?.unwrap();

    let ids: Vec<i32> = user.drones.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![alpha.id, zulu.id]);

    Ok(())
}

/// Tests username search.
///
/// Expected: prefix match only
#[tokio::test]
async fn searches_usernames() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = UserFactory::new(db).username("alice").build().await?;
    UserFactory::new(db).username("malice").build().await?;

    let query = USER_FILTERS.parse(&params("search=ali")).unwrap();
    let (users, total) = UserRepository::new(db).list(query, all_rows()).await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].id, alice.id);

    Ok(())
}

/// Tests that removing a user takes their drones and those drones' competitions with them.
///
/// Runs against the migrated schema so the foreign key actions are the ones shipped.
///
/// Expected: owned drone and its competition gone; unowned drone and the pilot kept
#[tokio::test]
async fn deleting_owner_cascades_to_drones_and_competitions() -> Result<(), DbErr> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, EntityTrait, PaginatorTrait};

    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let owner = factory::create_user(&db).await?;
    let category = factory::create_category(&db).await?;
    let owned = factory::create_drone(&db, category.id, Some(owner.id)).await?;
    let unowned = factory::create_drone(&db, category.id, None).await?;
    let pilot = factory::create_pilot(&db).await?;
    let competition = factory::create_competition(&db, pilot.id, owned.id).await?;

    entity::prelude::User::delete_by_id(owner.id).exec(&db).await?;

    assert!(entity::prelude::Drone::find_by_id(owned.id).one(&db).await?.is_none());
    assert!(entity::prelude::Competition::find_by_id(competition.id)
        .one(&db)
        .await?
        .is_none());
    assert!(entity::prelude::Drone::find_by_id(unowned.id).one(&db).await?.is_some());
    assert_eq!(entity::prelude::Pilot::find().count(&db).await?, 1);

    Ok(())
}
