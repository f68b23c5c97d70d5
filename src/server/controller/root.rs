use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::api::{ApiRootDto, ErrorDto},
    server::{
        error::AppError,
        middleware::{identity::Identity, throttle::ThrottleGuard},
        service::throttle::ThrottleScope,
        state::AppState,
        util::link::LinkBuilder,
    },
};

/// Tag for grouping the API root in OpenAPI documentation
pub static ROOT_TAG: &str = "root";

/// Lists the entry points of the API.
///
/// # Returns
/// - `200 OK` - Links to every collection
/// - `429 Too Many Requests` - Default throttle scope exhausted
#[utoipa::path(
    get,
    path = "/",
    tag = ROOT_TAG,
    responses(
        (status = 200, description = "Links to every collection", body = ApiRootDto),
        (status = 429, description = "Request was throttled", body = ErrorDto)
    ),
)]
pub async fn api_root(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, AppError> {
    ThrottleGuard::new(&state.throttle, &identity).require(ThrottleScope::Default)?;

    let links = LinkBuilder::new(&state.app_url);

    Ok((
        StatusCode::OK,
        Json(ApiRootDto {
            drone_categories: links.categories(),
            drones: links.drones(),
            pilots: links.pilots(),
            competitions: links.competitions(),
        }),
    ))
}
