use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub url: String,
    pub id: i32,
    pub username: String,
    pub drones: Vec<UserDroneDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDroneDto {
    pub url: String,
    pub name: String,
}
