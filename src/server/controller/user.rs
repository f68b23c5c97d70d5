use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        user::UserDto,
    },
    server::{
        controller::not_found,
        error::AppError,
        filter::user::USER_FILTERS,
        middleware::{identity::Identity, throttle::ThrottleGuard},
        service::{throttle::ThrottleScope, user::UserService},
        state::AppState,
        util::{link::LinkBuilder, pagination::PageRequest, query::QueryParams},
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "users";

/// List users with links to the drones they own.
///
/// Users are read-only over the API.
#[utoipa::path(
    get,
    path = "/users/",
    tag = USER_TAG,
    params(
        ("username" = Option<String>, Query, description = "Exact username"),
        ("search" = Option<String>, Query, description = "Username prefix"),
        ("ordering" = Option<String>, Query, description = "username; prefix with - to reverse"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    identity: Identity,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let params = QueryParams::parse(query.as_deref());
    let list_query = USER_FILTERS.parse(&params)?;
    let page = PageRequest::from_params(&params, state.page_size, state.max_page_size);

    let (users, total) = UserService::new(&state.db).list(list_query, page).await?;

    let links = LinkBuilder::new(&state.app_url);
    let results = users.into_iter().map(|u| u.into_dto(&links)).collect();

    Ok((
        StatusCode::OK,
        Json(page.envelope(&links.users(), &params, total, results)),
    ))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 429, description = "Request was throttled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let user = UserService::new(&state.db)
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((StatusCode::OK, Json(user.into_dto(&links))))
}
