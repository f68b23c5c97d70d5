use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        drone::{CreateDroneDto, DroneDto, UpdateDroneDto},
    },
    server::{
        controller::not_found,
        error::AppError,
        filter::drone::DRONE_FILTERS,
        middleware::{auth::AuthGuard, identity::Identity, throttle::ThrottleGuard},
        model::drone::{CreateDroneParams, UpdateDroneParams},
        service::{drone::DroneService, throttle::ThrottleScope},
        state::AppState,
        util::{link::LinkBuilder, pagination::PageRequest, query::QueryParams},
    },
};

/// Tag for grouping drone endpoints in OpenAPI documentation
pub static DRONE_TAG: &str = "drones";

/// List drones.
///
/// Supports exact filters, prefix search on the drone name, containment search on the
/// category name, ordering and limit/offset pagination. Open to anonymous callers.
///
/// # Returns
/// - `200 OK` - Page of drones
/// - `400 Bad Request` - Unusable filter value
/// - `429 Too Many Requests` - Drones throttle scope exhausted
#[utoipa::path(
    get,
    path = "/drones/",
    tag = DRONE_TAG,
    params(
        ("name" = Option<String>, Query, description = "Exact drone name"),
        ("drone_category" = Option<i32>, Query, description = "Drone category id"),
        ("manufacturing_date" = Option<String>, Query, description = "Exact manufacturing date"),
        ("has_it_competed" = Option<bool>, Query, description = "Whether the drone has competed"),
        ("search" = Option<String>, Query, description = "Name prefix or category name terms"),
        ("ordering" = Option<String>, Query, description = "name, manufacturing_date; prefix with - to reverse"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of drones", body = PaginatedDto<DroneDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_drones(
    State(state): State<AppState>,
    identity: Identity,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Drones)?;

    let params = QueryParams::parse(query.as_deref());
    let list_query = DRONE_FILTERS.parse(&params)?;
    let page = PageRequest::from_params(&params, state.page_size, state.max_page_size);

    let (drones, total) = DroneService::new(&state.db).list(list_query, page).await?;

    let links = LinkBuilder::new(&state.app_url);
    let results = drones.into_iter().map(|d| d.into_dto(&links)).collect();

    Ok((
        StatusCode::OK,
        Json(page.envelope(&links.drones(), &params, total, results)),
    ))
}

/// Register a drone.
///
/// The authenticated caller becomes the drone's owner; an `owner` in the body is ignored.
///
/// # Returns
/// - `201 Created` - Created drone
/// - `400 Bad Request` - Invalid body, duplicate name or unknown category
/// - `401 Unauthorized` - Anonymous caller
/// - `429 Too Many Requests` - Drones throttle scope exhausted
#[utoipa::path(
    post,
    path = "/drones/",
    tag = DRONE_TAG,
    request_body = CreateDroneDto,
    responses(
        (status = 201, description = "Successfully created drone", body = DroneDto),
        (status = 400, description = "Invalid drone data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_drone(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    payload: Result<Json<CreateDroneDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Drones)?;
    let user = AuthGuard::new(&identity, &method).require_user()?;
    let Json(payload) = payload?;

    let drone = DroneService::new(&state.db)
        .create(CreateDroneParams::from_dto(user.id, payload))
        .await?;

    tracing::info!("User {} registered drone {}", user.username, drone.id);

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::CREATED, Json(drone.into_dto(&links))))
}

/// Get a drone by ID.
///
/// # Returns
/// - `200 OK` - The drone
/// - `404 Not Found` - Unknown id
/// - `429 Too Many Requests` - Drones throttle scope exhausted
#[utoipa::path(
    get,
    path = "/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    responses(
        (status = 200, description = "Drone", body = DroneDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_drone(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Drones)?;

    let drone = DroneService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(drone.into_dto(&links))))
}

/// Replace a drone.
///
/// # Access Control
/// - Owner only; unowned drones cannot be modified
///
/// # Returns
/// - `200 OK` - Updated drone
/// - `400 Bad Request` - Invalid body, duplicate name or unknown category
/// - `401 Unauthorized` - Anonymous caller
/// - `403 Forbidden` - Caller does not own the drone
/// - `404 Not Found` - Unknown id
#[utoipa::path(
    put,
    path = "/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    request_body = CreateDroneDto,
    responses(
        (status = 200, description = "Successfully updated drone", body = DroneDto),
        (status = 400, description = "Invalid drone data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Caller does not own the drone", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_drone(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<CreateDroneDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    require_drone_owner(&state, &identity, &method, id).await?;
    let Json(payload) = payload?;

    let drone = DroneService::new(&state.db)
        .update(UpdateDroneParams::replace(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(drone.into_dto(&links))))
}

/// Partially update a drone.
///
/// # Access Control
/// - Owner only; unowned drones cannot be modified
///
/// # Returns
/// - `200 OK` - Updated drone
/// - `400 Bad Request` - Invalid body, duplicate name or unknown category
/// - `401 Unauthorized` - Anonymous caller
/// - `403 Forbidden` - Caller does not own the drone
/// - `404 Not Found` - Unknown id
#[utoipa::path(
    patch,
    path = "/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    request_body = UpdateDroneDto,
    responses(
        (status = 200, description = "Successfully updated drone", body = DroneDto),
        (status = 400, description = "Invalid drone data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Caller does not own the drone", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn patch_drone(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateDroneDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    require_drone_owner(&state, &identity, &method, id).await?;
    let Json(payload) = payload?;

    let drone = DroneService::new(&state.db)
        .update(UpdateDroneParams::from_dto(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(drone.into_dto(&links))))
}

/// Delete a drone and its competitions.
///
/// # Access Control
/// - Owner only; unowned drones cannot be deleted
///
/// # Returns
/// - `204 No Content` - Drone deleted
/// - `401 Unauthorized` - Anonymous caller
/// - `403 Forbidden` - Caller does not own the drone
/// - `404 Not Found` - Unknown id
#[utoipa::path(
    delete,
    path = "/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    responses(
        (status = 204, description = "Successfully deleted drone"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Caller does not own the drone", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_drone(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    require_drone_owner(&state, &identity, &method, id).await?;

    if !DroneService::new(&state.db).delete(id).await? {
        return Err(not_found());
    }

    tracing::info!("Drone {} deleted by user {:?}", id, identity.user_id());

    Ok(StatusCode::NO_CONTENT)
}

/// Throttles the request, then checks both authorization gates against the stored owner.
///
/// Anonymous mutations are rejected before the drone is looked up.
async fn require_drone_owner(
    state: &AppState,
    identity: &Identity,
    method: &Method,
    id: i32,
) -> Result<(), AppError> {
    ThrottleGuard::new(&state.throttle, identity).require(ThrottleScope::Drones)?;

    let guard = AuthGuard::new(identity, method);
    guard.require_authenticated_or_read_only()?;

    let drone = DroneService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    guard.require_owner(drone.id, drone.owner_id)
}
