use super::*;

/// Tests exact filters combined with AND.
///
/// Expected: only the competed drone of the first category
#[tokio::test]
async fn filters_by_category_and_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_category(db).await?;
    let second = factory::create_category(db).await?;
    let competed = DroneFactory::new(db, first.id)
        .has_it_competed(true)
        .build()
        .await?;
    DroneFactory::new(db, first.id).build().await?;
    DroneFactory::new(db, second.id)
        .has_it_competed(true)
        .build()
        .await?;

    let query = DRONE_FILTERS
        .parse(&params(&format!(
            "drone_category={}&has_it_competed=True",
            first.id
        )))
        .unwrap();
    let (drones, total) = DroneRepository::new(db).list(query, all_rows()).await?;

    assert_eq!(total, 1);
    assert_eq!(drones[0].id, competed.id);

    Ok(())
}

/// Tests filtering on the manufacturing date.
///
/// Expected: only the drone manufactured on the given day
#[tokio::test]
async fn filters_by_manufacturing_date() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let dated = DroneFactory::new(db, category.id)
        .manufacturing_date(Utc.with_ymd_and_hms(2017, 10, 2, 0, 0, 0).unwrap())
        .build()
        .await?;
    factory::create_drone(db, category.id, None).await?;

    let query = DRONE_FILTERS
        .parse(&params("manufacturing_date=2017-10-02"))
        .unwrap();
    let (drones, _) = DroneRepository::new(db).list(query, all_rows()).await?;

    assert_eq!(drones.len(), 1);
    assert_eq!(drones[0].id, dated.id);

    Ok(())
}

/// Tests that name search is a case-sensitive prefix match.
///
/// Expected: "Atom" matches "Atom X1" but neither "atom mini" nor "Big Atom"
#[tokio::test]
async fn searches_name_prefix_case_sensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = DroneCategoryFactory::new(db).name("Wing").build().await?;
    let atom = DroneFactory::new(db, category.id).name("Atom X1").build().await?;
    DroneFactory::new(db, category.id).name("atom mini").build().await?;
    DroneFactory::new(db, category.id).name("Big Atom").build().await?;

    let query = DRONE_FILTERS.parse(&params("search=Atom")).unwrap();
    let (drones, _) = DroneRepository::new(db).list(query, all_rows()).await?;

    assert_eq!(drones.len(), 1);
    assert_eq!(drones[0].id, atom.id);

    Ok(())
}

/// Tests that search also matches the category name and requires every term.
///
/// Expected: "quad" finds drones in "Quadcopter"; "quad Zephyr" narrows to one of them
#[tokio::test]
async fn searches_category_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let quad = DroneCategoryFactory::new(db).name("Quadcopter").build().await?;
    let wing = DroneCategoryFactory::new(db).name("Wing").build().await?;
    let zephyr = DroneFactory::new(db, quad.id).name("Zephyr").build().await?;
    DroneFactory::new(db, quad.id).name("Hawk").build().await?;
    DroneFactory::new(db, wing.id).name("Zephyr II").build().await?;

    let repo = DroneRepository::new(db);

    let (drones, _) = repo
        .list(DRONE_FILTERS.parse(&params("search=quad")).unwrap(), all_rows())
        .await?;
    assert_eq!(drones.len(), 2);

    let (drones, _) = repo
        .list(
            DRONE_FILTERS.parse(&params("search=quad%20Zephyr")).unwrap(),
            all_rows(),
        )
        .await?;
    assert_eq!(drones.len(), 1);
    assert_eq!(drones[0].id, zephyr.id);

    Ok(())
}

/// Tests requested ordering.
///
/// Expected: newest manufacturing date first
#[tokio::test]
async fn orders_by_requested_field() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let older = DroneFactory::new(db, category.id)
        .name("A")
        .manufacturing_date(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap())
        .build()
        .await?;
    let newer = DroneFactory::new(db, category.id)
        .name("B")
        .manufacturing_date(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap())
        .build()
        .await?;

    let query = DRONE_FILTERS
        .parse(&params("ordering=-manufacturing_date"))
        .unwrap();
    let (drones, _) = DroneRepository::new(db).list(query, all_rows()).await?;

    let ids: Vec<i32> = drones.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}
