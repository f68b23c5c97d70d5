use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        competition::{CompetitionDto, CreateCompetitionDto, UpdateCompetitionDto},
    },
    server::{
        controller::not_found,
        error::AppError,
        filter::competition::COMPETITION_FILTERS,
        middleware::{auth::AuthGuard, identity::Identity, throttle::ThrottleGuard},
        model::competition::{CreateCompetitionParams, UpdateCompetitionParams},
        service::{competition::CompetitionService, throttle::ThrottleScope},
        state::AppState,
        util::{link::LinkBuilder, pagination::PageRequest, query::QueryParams},
    },
};

/// Tag for grouping competition endpoints in OpenAPI documentation
pub static COMPETITION_TAG: &str = "competitions";

/// List competition results.
///
/// Besides exact filters this endpoint accepts inclusive ranges on the achievement date
/// and the distance, and matches pilot and drone by name.
///
/// # Returns
/// - `200 OK` - Page of competitions, longest distance first by default
/// - `400 Bad Request` - Unusable filter value
/// - `429 Too Many Requests` - Default throttle scope exhausted
#[utoipa::path(
    get,
    path = "/competitions/",
    tag = COMPETITION_TAG,
    params(
        ("distance_in_feet" = Option<i32>, Query, description = "Exact distance"),
        ("from_achievement_date" = Option<String>, Query, description = "Achieved on or after"),
        ("to_achievement_date" = Option<String>, Query, description = "Achieved on or before"),
        ("min_distance_in_feet" = Option<i32>, Query, description = "Minimum distance"),
        ("max_distance_in_feet" = Option<i32>, Query, description = "Maximum distance"),
        ("drone_name" = Option<String>, Query, description = "Exact drone name"),
        ("pilot_name" = Option<String>, Query, description = "Exact pilot name"),
        ("ordering" = Option<String>, Query, description = "distance_in_feet, distance_achievement_date; prefix with - to reverse"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of competitions", body = PaginatedDto<CompetitionDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    identity: Identity,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let params = QueryParams::parse(query.as_deref());
    let list_query = COMPETITION_FILTERS.parse(&params)?;
    let page = PageRequest::from_params(&params, state.page_size, state.max_page_size);

    let (competitions, total) = CompetitionService::new(&state.db)
        .list(list_query, page)
        .await?;

    let links = LinkBuilder::new(&state.app_url);
    let results = competitions.into_iter().map(|c| c.into_dto(&links)).collect();

    Ok((
        StatusCode::OK,
        Json(page.envelope(&links.competitions(), &params, total, results)),
    ))
}

/// Record a competition result.
///
/// # Returns
/// - `201 Created` - Created competition
/// - `400 Bad Request` - Invalid body, unknown pilot or unknown drone
/// - `401 Unauthorized` - Anonymous caller
#[utoipa::path(
    post,
    path = "/competitions/",
    tag = COMPETITION_TAG,
    request_body = CreateCompetitionDto,
    responses(
        (status = 201, description = "Successfully created competition", body = CompetitionDto),
        (status = 400, description = "Invalid competition data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_competition(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    payload: Result<Json<CreateCompetitionDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let competition = CompetitionService::new(&state.db)
        .create(CreateCompetitionParams::from_dto(payload))
        .await?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::CREATED, Json(competition.into_dto(&links))))
}

#[utoipa::path(
    get,
    path = "/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    responses(
        (status = 200, description = "Competition", body = CompetitionDto),
        (status = 404, description = "Competition not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_competition(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let competition = CompetitionService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(competition.into_dto(&links))))
}

#[utoipa::path(
    put,
    path = "/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    request_body = CreateCompetitionDto,
    responses(
        (status = 200, description = "Successfully updated competition", body = CompetitionDto),
        (status = 400, description = "Invalid competition data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Competition not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_competition(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<CreateCompetitionDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let competition = CompetitionService::new(&state.db)
        .update(UpdateCompetitionParams::replace(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(competition.into_dto(&links))))
}

#[utoipa::path(
    patch,
    path = "/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    request_body = UpdateCompetitionDto,
    responses(
        (status = 200, description = "Successfully updated competition", body = CompetitionDto),
        (status = 400, description = "Invalid competition data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Competition not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn patch_competition(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateCompetitionDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let competition = CompetitionService::new(&state.db)
        .update(UpdateCompetitionParams::from_dto(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(competition.into_dto(&links))))
}

#[utoipa::path(
    delete,
    path = "/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    responses(
        (status = 204, description = "Successfully deleted competition"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Competition not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_competition(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;

    if !CompetitionService::new(&state.db).delete(id).await? {
        return Err(not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
