use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Limit/offset page envelope used by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedDto<T> {
    /// Total number of rows matching the filters, ignoring pagination.
    pub count: u64,
    /// Absolute link to the next page, if any.
    pub next: Option<String>,
    /// Absolute link to the previous page, if any.
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Discovery map returned by the API root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiRootDto {
    #[serde(rename = "drone-categories")]
    pub drone_categories: String,
    pub drones: String,
    pub pilots: String,
    pub competitions: String,
}
