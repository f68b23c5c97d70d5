use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DroneDto {
    pub url: String,
    pub name: String,
    /// Name of the drone's category.
    pub drone_category: String,
    /// Username of the owner.
    pub owner: Option<String>,
    pub manufacturing_date: DateTime<Utc>,
    pub has_it_competed: bool,
    pub inserted_timestamp: DateTime<Utc>,
}

/// Body of drone creation and full update requests.
///
/// The owner is assigned by the server; an `owner` key in the body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateDroneDto {
    pub name: String,
    /// Name of an existing drone category.
    pub drone_category: String,
    pub manufacturing_date: DateTime<Utc>,
    #[serde(default)]
    pub has_it_competed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateDroneDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub drone_category: Option<String>,
    #[serde(default)]
    pub manufacturing_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_it_competed: Option<bool>,
}
