use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetitionDto {
    pub url: String,
    pub id: i32,
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    /// Name of the pilot.
    pub pilot: String,
    /// Name of the drone.
    pub drone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateCompetitionDto {
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    /// Name of an existing pilot.
    pub pilot: String,
    /// Name of an existing drone.
    pub drone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateCompetitionDto {
    #[serde(default)]
    pub distance_in_feet: Option<i32>,
    #[serde(default)]
    pub distance_achievement_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pilot: Option<String>,
    #[serde(default)]
    pub drone: Option<String>,
}
