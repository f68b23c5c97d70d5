//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered through utoipa's `OpenApiRouter` so that its OpenAPI
//! specification is collected into one document, served together with Swagger UI at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, state::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers that share a path are registered in the same `routes!` call so axum sees a
/// single method router per path.
///
/// # Registered Endpoints
/// - `GET /` - Links to every collection
/// - `GET|POST /drone-categories/`, `GET|PUT|PATCH|DELETE /drone-categories/{id}`
/// - `GET|POST /drones/`, `GET|PUT|PATCH|DELETE /drones/{id}`
/// - `GET|POST /pilots/`, `GET|PUT|PATCH|DELETE /pilots/{id}`
/// - `GET|POST /competitions/`, `GET|PUT|PATCH|DELETE /competitions/{id}`
/// - `GET /users/`, `GET /users/{id}`
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Drones", description = "Drone racing API"), tags(
        (name = controller::root::ROOT_TAG, description = "API entry point"),
        (name = controller::category::CATEGORY_TAG, description = "Drone category API routes"),
        (name = controller::drone::DRONE_TAG, description = "Drone API routes"),
        (name = controller::pilot::PILOT_TAG, description = "Pilot API routes"),
        (name = controller::competition::COMPETITION_TAG, description = "Competition API routes"),
        (name = controller::user::USER_TAG, description = "User API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::root::api_root))
        .routes(routes!(
            controller::category::list_categories,
            controller::category::create_category
        ))
        .routes(routes!(
            controller::category::get_category,
            controller::category::update_category,
            controller::category::patch_category,
            controller::category::delete_category
        ))
        .routes(routes!(
            controller::drone::list_drones,
            controller::drone::create_drone
        ))
        .routes(routes!(
            controller::drone::get_drone,
            controller::drone::update_drone,
            controller::drone::patch_drone,
            controller::drone::delete_drone
        ))
        .routes(routes!(
            controller::pilot::list_pilots,
            controller::pilot::create_pilot
        ))
        .routes(routes!(
            controller::pilot::get_pilot,
            controller::pilot::update_pilot,
            controller::pilot::patch_pilot,
            controller::pilot::delete_pilot
        ))
        .routes(routes!(
            controller::competition::list_competitions,
            controller::competition::create_competition
        ))
        .routes(routes!(
            controller::competition::get_competition,
            controller::competition::update_competition,
            controller::competition::patch_competition,
            controller::competition::delete_competition
        ))
        .routes(routes!(controller::user::list_users))
        .routes(routes!(controller::user::get_user))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
