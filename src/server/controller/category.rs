use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        category::{CreateDroneCategoryDto, DroneCategoryDto, UpdateDroneCategoryDto},
    },
    server::{
        controller::not_found,
        error::AppError,
        filter::category::CATEGORY_FILTERS,
        middleware::{auth::AuthGuard, identity::Identity, throttle::ThrottleGuard},
        model::category::{CreateDroneCategoryParams, UpdateDroneCategoryParams},
        service::{category::DroneCategoryService, throttle::ThrottleScope},
        state::AppState,
        util::{link::LinkBuilder, pagination::PageRequest, query::QueryParams},
    },
};

/// Tag for grouping drone category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "drone-categories";

/// List drone categories.
///
/// # Returns
/// - `200 OK` - Page of categories, each with links to its drones
/// - `400 Bad Request` - Unusable filter value
/// - `429 Too Many Requests` - Default throttle scope exhausted
#[utoipa::path(
    get,
    path = "/drone-categories/",
    tag = CATEGORY_TAG,
    params(
        ("name" = Option<String>, Query, description = "Exact category name"),
        ("search" = Option<String>, Query, description = "Category name prefix"),
        ("ordering" = Option<String>, Query, description = "name; prefix with - to reverse"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of drone categories", body = PaginatedDto<DroneCategoryDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_categories(
    State(state): State<AppState>,
    identity: Identity,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let params = QueryParams::parse(query.as_deref());
    let list_query = CATEGORY_FILTERS.parse(&params)?;
    let page = PageRequest::from_params(&params, state.page_size, state.max_page_size);

    let (categories, total) = DroneCategoryService::new(&state.db)
        .list(list_query, page)
        .await?;

    let links = LinkBuilder::new(&state.app_url);
    let results = categories.into_iter().map(|c| c.into_dto(&links)).collect();

    Ok((
        StatusCode::OK,
        Json(page.envelope(&links.categories(), &params, total, results)),
    ))
}

/// Create a drone category.
///
/// # Returns
/// - `201 Created` - Created category
/// - `400 Bad Request` - Invalid body or duplicate name
/// - `401 Unauthorized` - Anonymous caller
#[utoipa::path(
    post,
    path = "/drone-categories/",
    tag = CATEGORY_TAG,
    request_body = CreateDroneCategoryDto,
    responses(
        (status = 201, description = "Successfully created drone category", body = DroneCategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    payload: Result<Json<CreateDroneCategoryDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let category = DroneCategoryService::new(&state.db)
        .create(CreateDroneCategoryParams::from_dto(payload))
        .await?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::CREATED, Json(category.into_dto(&links))))
}

/// Get a drone category by ID.
#[utoipa::path(
    get,
    path = "/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    responses(
        (status = 200, description = "Drone category", body = DroneCategoryDto),
        (status = 404, description = "Drone category not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let category = DroneCategoryService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(category.into_dto(&links))))
}

/// Replace a drone category.
#[utoipa::path(
    put,
    path = "/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    request_body = CreateDroneCategoryDto,
    responses(
        (status = 200, description = "Successfully updated drone category", body = DroneCategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Drone category not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<CreateDroneCategoryDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let category = DroneCategoryService::new(&state.db)
        .update(UpdateDroneCategoryParams::replace(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(category.into_dto(&links))))
}

/// Partially update a drone category.
#[utoipa::path(
    patch,
    path = "/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    request_body = UpdateDroneCategoryDto,
    responses(
        (status = 200, description = "Successfully updated drone category", body = DroneCategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Drone category not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn patch_category(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateDroneCategoryDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;
    let Json(payload) = payload?;

    let category = DroneCategoryService::new(&state.db)
        .update(UpdateDroneCategoryParams::from_dto(id, payload))
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(category.into_dto(&links))))
}

/// Delete a drone category.
///
/// Every drone in the category goes with it, along with those drones' competitions.
///
/// # Returns
/// - `204 No Content` - Category deleted
/// - `401 Unauthorized` - Anonymous caller
/// - `404 Not Found` - Unknown id
#[utoipa::path(
    delete,
    path = "/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    responses(
        (status = 204, description = "Successfully deleted drone category"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "Drone category not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    identity: Identity,
    method: Method,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;
    AuthGuard::new(&identity, &method).require_authenticated_or_read_only()?;

    if !DroneCategoryService::new(&state.db).delete(id).await? {
        return Err(not_found());
    }

    tracing::info!("Drone category {} deleted by user {:?}", id, identity.user_id());

    Ok(StatusCode::NO_CONTENT)
}
