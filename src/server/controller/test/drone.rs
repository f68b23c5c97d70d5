use super::*;
use chrono::{TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};

fn drone_body(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "drone_category": category,
        "manufacturing_date": "2017-10-01T00:00:00Z",
        "has_it_competed": false,
    })
}

/// Tests drone creation by an authenticated caller.
///
/// Expected: 201, owner is the caller even when the body names someone else
#[tokio::test]
async fn create_assigns_caller_as_owner() {
    let app = TestApp::new().await;
    let alice = factory::create_user(&app.db).await.unwrap();
    let bob = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();

    let mut body = drone_body("Falcon", &category.name);
    body["owner"] = json!(bob.username);
    let response = app.post("/drones/", Some(&alice.token), body).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Falcon");
    assert_eq!(response.body["owner"], json!(alice.username));
    assert_eq!(response.body["drone_category"], json!(category.name));
    assert!(response.body["url"]
        .as_str()
        .unwrap()
        .starts_with("http://testserver/drones/"));
}

/// Tests that anonymous callers cannot create drones.
///
/// Expected: 401, nothing stored
#[tokio::test]
async fn anonymous_create_is_rejected() {
    let app = TestApp::new().await;
    let category = factory::create_category(&app.db).await.unwrap();

    let response = app
        .post("/drones/", None, drone_body("Falcon", &category.name))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["error"],
        "Authentication credentials were not provided."
    );
    assert_eq!(entity::prelude::Drone::find().count(&app.db).await.unwrap(), 0);
}

/// Tests that authentication is checked before the body.
///
/// Expected: 401 for an anonymous caller sending a malformed body
#[tokio::test]
async fn authentication_precedes_body_validation() {
    let app = TestApp::new().await;

    let response = app.post("/drones/", None, json!({ "name": 7 })).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

/// Tests duplicate drone names.
///
/// Expected: 400 with a uniqueness message
#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();

    let first = app
        .post("/drones/", Some(&user.token), drone_body("Falcon", &category.name))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post("/drones/", Some(&user.token), drone_body("Falcon", &category.name))
        .await;

    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "drone with this name already exists.");
}

/// Tests a drone referencing a category that does not exist.
///
/// Expected: 400 naming the missing category, nothing stored
#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();

    let response = app
        .post("/drones/", Some(&user.token), drone_body("Falcon", "Nope"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "drone_category: Object with name=Nope does not exist."
    );
    assert_eq!(entity::prelude::Drone::find().count(&app.db).await.unwrap(), 0);
}

/// Tests a body that is not valid for the endpoint.
///
/// Expected: 400
#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();

    let response = app
        .post("/drones/", Some(&user.token), json!({ "name": "Falcon" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

/// Tests the ownership gate on updates.
///
/// Expected: 403 for another user, 200 for the owner
#[tokio::test]
async fn only_owner_can_update() {
    let app = TestApp::new().await;
    let owner = factory::create_user(&app.db).await.unwrap();
    let other = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();
    let drone = factory::create_drone(&app.db, category.id, Some(owner.id))
        .await
        .unwrap();
    let uri = format!("/drones/{}", drone.id);

    let forbidden = app
        .patch(&uri, Some(&other.token), json!({ "name": "Stolen" }))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(
        forbidden.body["error"],
        "You do not have permission to perform this action."
    );

    let replaced = app
        .put(&uri, Some(&owner.token), drone_body("Renamed", &category.name))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["name"], "Renamed");
    assert_eq!(replaced.body["owner"], json!(owner.username));

    let patched = app
        .patch(&uri, Some(&owner.token), json!({ "has_it_competed": true }))
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["name"], "Renamed");
    assert_eq!(patched.body["has_it_competed"], true);
}

/// Tests that a drone without an owner cannot be modified.
///
/// Expected: 403 for any authenticated caller, 200 for anonymous reads
#[tokio::test]
async fn unowned_drone_is_read_only() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();
    let drone = factory::create_drone(&app.db, category.id, None).await.unwrap();
    let uri = format!("/drones/{}", drone.id);

    let response = app.delete(&uri, Some(&user.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let read = app.get(&uri, None).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["owner"], Value::Null);
}

/// Tests anonymous mutations on a drone.
///
/// Expected: 401 whether or not the drone exists
#[tokio::test]
async fn anonymous_mutation_is_rejected() {
    let app = TestApp::new().await;
    let owner = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();
    let drone = factory::create_drone(&app.db, category.id, Some(owner.id))
        .await
        .unwrap();

    let existing = app
        .patch(&format!("/drones/{}", drone.id), None, json!({ "name": "X" }))
        .await;
    assert_eq!(existing.status, StatusCode::UNAUTHORIZED);

    let missing = app.delete("/drones/9999", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
}

/// Tests deleting a drone.
///
/// Expected: 204 and its competitions are gone, later reads return 404
#[tokio::test]
async fn owner_can_delete() {
    let app = TestApp::new().await;
    let owner = factory::create_user(&app.db).await.unwrap();
    let category = factory::create_category(&app.db).await.unwrap();
    let drone = factory::create_drone(&app.db, category.id, Some(owner.id))
        .await
        .unwrap();
    let pilot = factory::create_pilot(&app.db).await.unwrap();
    factory::create_competition(&app.db, pilot.id, drone.id)
        .await
        .unwrap();
    let uri = format!("/drones/{}", drone.id);

    let response = app.delete(&uri, Some(&owner.token)).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        entity::prelude::Competition::find().count(&app.db).await.unwrap(),
        0
    );
}

/// Tests reading an unknown drone.
///
/// Expected: 404 with the standard message
#[tokio::test]
async fn unknown_drone_is_not_found() {
    let app = TestApp::new().await;
    let user = factory::create_user(&app.db).await.unwrap();

    let read = app.get("/drones/9999", None).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.body["error"], "Not found.");

    let update = app
        .patch("/drones/9999", Some(&user.token), json!({ "name": "X" }))
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
}

/// Tests the anonymous drones throttle scope.
///
/// Expected: three requests admitted, the fourth rejected with `Retry-After`,
/// other scopes unaffected
#[tokio::test]
async fn anonymous_drone_requests_are_throttled() {
    let app = TestApp::with_rates(ThrottleRates::default()).await;

    for _ in 0..3 {
        assert_eq!(app.get("/drones/", None).await.status, StatusCode::OK);
    }

    let throttled = app.get("/drones/", None).await;

    assert_eq!(throttled.status, StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = throttled.headers[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 3600);

    assert_eq!(app.get("/", None).await.status, StatusCode::OK);
}

/// Tests that authenticated callers are counted separately from anonymous ones.
///
/// Expected: authenticated request admitted after the anonymous budget is spent
#[tokio::test]
async fn authenticated_callers_have_their_own_budget() {
    let app = TestApp::with_rates(ThrottleRates::default()).await;
    let user = factory::create_user(&app.db).await.unwrap();

    for _ in 0..4 {
        app.get("/drones/", None).await;
    }

    assert_eq!(
        app.get("/drones/", Some(&user.token)).await.status,
        StatusCode::OK
    );
}

/// Tests exact filters, search, ordering and pagination on the drone list.
///
/// Expected: each query narrows or orders the results as requested
#[tokio::test]
async fn list_supports_filters_search_and_ordering() {
    let app = TestApp::new().await;
    let quad = factory::drone_category::DroneCategoryFactory::new(&app.db)
        .name("Quadcopter")
        .build()
        .await
        .unwrap();
    let octo = factory::drone_category::DroneCategoryFactory::new(&app.db)
        .name("Octocopter")
        .build()
        .await
        .unwrap();
    for (name, category, competed, year) in [
        ("Falcon", quad.id, true, 2016),
        ("Fang", quad.id, false, 2018),
        ("Atom", octo.id, true, 2017),
        ("Zephyr", octo.id, false, 2015),
        ("Eagle", quad.id, false, 2019),
    ] {
        factory::drone::DroneFactory::new(&app.db, category)
            .name(name)
            .has_it_competed(competed)
            .manufacturing_date(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap())
            .build()
            .await
            .unwrap();
    }

    let page = app.get("/drones/", None).await;
    assert_eq!(page.body["count"], 5);
    assert_eq!(result_names(&page.body), ["Atom", "Eagle", "Falcon", "Fang"]);
    assert_eq!(
        page.body["next"],
        "http://testserver/drones/?limit=4&offset=4"
    );
    assert_eq!(page.body["previous"], Value::Null);

    let competed = app.get("/drones/?has_it_competed=true", None).await;
    assert_eq!(result_names(&competed.body), ["Atom", "Falcon"]);

    let by_category = app
        .get(&format!("/drones/?drone_category={}", octo.id), None)
        .await;
    assert_eq!(result_names(&by_category.body), ["Atom", "Zephyr"]);

    let prefix = app.get("/drones/?search=Fa", None).await;
    assert_eq!(result_names(&prefix.body), ["Falcon", "Fang"]);

    let category_term = app.get("/drones/?search=octo", None).await;
    assert_eq!(result_names(&category_term.body), ["Atom", "Zephyr"]);

    let newest = app
        .get("/drones/?ordering=-manufacturing_date&limit=2", None)
        .await;
    assert_eq!(result_names(&newest.body), ["Eagle", "Fang"]);

    let invalid = app.get("/drones/?has_it_competed=maybe", None).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

/// Tests that listing is free of side effects.
///
/// Expected: two identical list requests return identical bodies
#[tokio::test]
async fn list_is_idempotent() {
    let app = TestApp::new().await;
    factory::helpers::create_drone_with_dependencies(&app.db)
        .await
        .unwrap();

    let first = app.get("/drones/?ordering=name", None).await;
    let second = app.get("/drones/?ordering=name", None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}
