use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::drone::DroneDto;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single letter code stored in the database.
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PilotDto {
    pub url: String,
    pub name: String,
    pub gender: Gender,
    pub gender_description: String,
    pub races_count: i32,
    pub inserted_timestamp: DateTime<Utc>,
    pub competitions: Vec<PilotCompetitionDto>,
}

/// A competition as nested inside a pilot, with the full drone representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PilotCompetitionDto {
    pub url: String,
    pub id: i32,
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    pub drone: DroneDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePilotDto {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub races_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatePilotDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub races_count: Option<i32>,
}
