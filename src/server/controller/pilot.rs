use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        pilot::{CreatePilotDto, PilotDto, UpdatePilotDto},
    },
    server::{
        controller::not_found,
        error::AppError,
        filter::pilot::PILOT_FILTERS,
        middleware::{auth::AuthGuard, identity::Identity, throttle::ThrottleGuard},
        model::pilot::{CreatePilotParams, UpdatePilotParams},
        service::{pilot::PilotService, throttle::ThrottleScope},
        state::AppState,
        util::{link::LinkBuilder, pagination::PageRequest, query::QueryParams},
    },
};

/// Tag for grouping pilot endpoints in OpenAPI documentation
pub static PILOT_TAG: &str = "pilots";

/// List pilots with their competitions.
///
/// # Returns
/// - `200 OK` - Page of pilots
/// - `400 Bad Request` - Unusable filter value
/// - `429 Too Many Requests` - Pilots throttle scope exhausted
#[utoipa::path(
    get,
    path = "/pilots/",
    tag = PILOT_TAG,
    params(
        ("name" = Option<String>, Query, description = "Exact pilot name"),
        ("gender" = Option<String>, Query, description = "Gender code, M or F"),
        ("races_count" = Option<i32>, Query, description = "Exact races count"),
        ("search" = Option<String>, Query, description = "Pilot name prefix"),
        ("ordering" = Option<String>, Query, description = "name, races_count; prefix with - to reverse"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of pilots", body = PaginatedDto<PilotDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_pilots(
    State(state): State<AppState>,
    identity: Identity,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;

    let params = QueryParams::parse(query.as_deref());
    let list_query = PILOT_FILTERS.parse(&params)?;
    let page = PageRequest::from_params(&params, state.page_size, state.max_page_size);

    let (pilots, total) = PilotService::new(&state.db).list(list_query, page).await?;

    let links = LinkBuilder::new(&state.app_url);
    let results = pilots.into_iter().map(|p| p.into_dto(&links)).collect();

    Ok((
        StatusCode::OK,
        Json(page.envelope(&links.pilots(), &params, total, results)),
    ))
}

/// Register a pilot.
#[utoipa::path(
    post,
    path = "/pilots/",
    tag = PILOT_TAG,
    request_body = CreatePilotDto,
    responses(
        (status = 201, description = "Successfully created pilot", body = PilotDto),
        (status = 400, description = "Invalid pilot data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_pilot(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    payload: Result<Json<CreatePilotDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let pilot = PilotService::new(&state.db)
        .create(CreatePilotParams::from_dto(payload))
        .await?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::CREATED, Json(pilot.into_dto(&links))))
}

#[utoipa::path(
    get,
    path = "/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    responses(
        (status = 200, description = "Pilot", body = PilotDto),
        (status = 404, description = "Pilot not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pilot(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;

    let pilot = PilotService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(pilot.into_dto(&links))))
}

#[utoipa::path(
    put,
    path = "/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    request_body = CreatePilotDto,
    responses(
        (status = 200, description = "Successfully updated pilot", body = PilotDto),
        (status = 400, description = "Invalid pilot data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_pilot(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<CreatePilotDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let pilot = PilotService::new(&state.db)
        .update(UpdatePilotParams::replace(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(pilot.into_dto(&links))))
}

#[utoipa::path(
    patch,
    path = "/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    request_body = UpdatePilotDto,
    responses(
        (status = 200, description = "Successfully updated pilot", body = PilotDto),
        (status = 400, description = "Invalid pilot data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn patch_pilot(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<UpdatePilotDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let pilot = PilotService::new(&state.db)
        .update(UpdatePilotParams::from_dto(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(pilot.into_dto(&links))))
}

/// Delete a pilot together with the pilot's competitions.
#[utoipa::path(
    delete,
    path = "/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    responses(
        (status = 204, description = "Successfully deleted pilot"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_pilot(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Pilots)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;

    if !PilotService::new(&state.db).delete(id).await? {
        return Err(not_found());
    }

    tracing::info!("Pilot {} deleted by user {:?}", id, identity.user_id());

    Ok(StatusCode::NO_CONTENT)
}
