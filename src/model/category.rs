use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DroneCategoryDto {
    pub url: String,
    pub id: i32,
    pub name: String,
    /// Links to the drones in this category.
    pub drones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateDroneCategoryDto {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateDroneCategoryDto {
    #[serde(default)]
    pub name: Option<String>,
}
