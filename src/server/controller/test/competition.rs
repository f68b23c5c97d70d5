use super::*;
use chrono::{TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests recording a competition by pilot and drone name.
///
/// Expected: 201 with both names echoed back
#[tokio::test]
async fn creates_competition_by_names() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();
    let (_, _, drone) = factory::helpers::create_drone_with_dependencies(&app.db)
        .await
        .unwrap();
    let pilot = factory::create_pilot(&app.db).await.unwrap();

    let response = app
        .post(
            "/competitions/",
            Some(&user.token),
            json!({
                "distance_in_feet": 800,
                "distance_achievement_date": "2017-10-20T05:03:20Z",
                "pilot": pilot.name,
                "drone": drone.name,
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["distance_in_feet"], 800);
    assert_eq!(response.body["pilot"], json!(pilot.name));
    assert_eq!(response.body["drone"], json!(drone.name));
}

/// Tests a competition referencing an unknown pilot.
///
/// Expected: 400 naming the pilot, nothing stored
#[tokio::test]
async fn unknown_pilot_is_rejected() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();
    let (_, _, drone) = factory::helpers::create_drone_with_dependencies(&app.db)
        .await
        .unwrap();

    let response = app
        .post(
            "/competitions/",
            Some(&user.token),
            json!({
                "distance_in_feet": 800,
                "distance_achievement_date": "2017-10-20T05:03:20Z",
                "pilot": "Nobody",
                "drone": drone.name,
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "pilot: Object with name=Nobody does not exist."
    );
    assert_eq!(
        entity::prelude::Competition::find().count(&app.db).await.unwrap(),
        0
    );
}

/// Tests range filters and the default ordering of the competition list.
///
/// Expected: longest distance first; inclusive date and distance ranges; name matches
#[tokio::test]
async fn list_filters_by_ranges_and_names() {
    let app = TestApp::new().await;
    let (_, category, falcon) = factory::helpers::create_drone_with_dependencies(&app.db)
        .await
        .unwrap();
    let atom = factory::drone::DroneFactory::new(&app.db, category.id)
        .name("Atom")
        .build()
        .await
        .unwrap();
    let pilot = factory::create_pilot(&app.db).await.unwrap();
    for (drone_id, distance, day) in [(falcon.id, 700, 10), (atom.id, 900, 20), (atom.id, 800, 30)] {
        factory::competition::CompetitionFactory::new(&app.db, pilot.id, drone_id)
            .distance_in_feet(distance)
            .distance_achievement_date(Utc.with_ymd_and_hms(2017, 10, day, 0, 0, 0).unwrap())
            .build()
            .await
            .unwrap();
    }

    let distances = |body: &Value| -> Vec<i64> {
        body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["distance_in_feet"].as_i64().unwrap())
            .collect()
    };

    let all = app.get("/competitions/", None).await;
    assert_eq!(distances(&all.body), [900, 800, 700]);

    let ranged = app
        .get(
            "/competitions/?min_distance_in_feet=750&max_distance_in_feet=900",
            None,
        )
        .await;
    assert_eq!(distances(&ranged.body), [900, 800]);

    let dated = app
        .get(
            "/competitions/?from_achievement_date=2017-10-15&to_achievement_date=2017-10-30",
            None,
        )
        .await;
    assert_eq!(distances(&dated.body), [900, 800]);

    let by_drone = app.get("/competitions/?drone_name=Atom", None).await;
    assert_eq!(distances(&by_drone.body), [900, 800]);

    let oldest_first = app
        .get("/competitions/?ordering=distance_achievement_date", None)
        .await;
    assert_eq!(distances(&oldest_first.body), [700, 900, 800]);

    let invalid = app
        .get("/competitions/?min_distance_in_feet=far", None)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

/// Tests moving a competition to another drone and deleting it.
///
/// Expected: 200 with the new drone name, then 204 and 404
#[tokio::test]
async fn updates_then_deletes_competition() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();
    let (drone, _, competition) =
        factory::helpers::create_competition_with_dependencies(&app.db)
            .await
            .unwrap();
    let other = factory::drone::DroneFactory::new(&app.db, drone.drone_category_id)
        .name("Replacement")
        .build()
        .await
        .unwrap();
    let uri = format!("/competitions/{}", competition.id);

    let patched = app
        .patch(&uri, Some(&user.token), json!({ "drone": other.name }))
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["drone"], "Replacement");
    assert_eq!(patched.body["distance_in_feet"], 800);

    let unknown = app
        .patch(&uri, Some(&user.token), json!({ "drone": "Ghost" }))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    assert_eq!(
        app.delete(&uri, Some(&user.token)).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);
}
