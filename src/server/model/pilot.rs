//! Pilot domain models and parameters.
//!
//! A pilot carries its competitions, each with the full drone that flew it, so a pilot
//! detail response needs no follow-up requests.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::pilot::{CreatePilotDto, Gender, PilotCompetitionDto, PilotDto, UpdatePilotDto},
    server::{model::drone::Drone, util::link::LinkBuilder},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Pilot {
    pub id: i32,
    pub name: String,
    pub gender: Gender,
    pub races_count: i32,
    pub inserted_timestamp: DateTime<Utc>,
    /// Competitions of this pilot, longest distance first.
    pub competitions: Vec<PilotCompetition>,
}

/// Competition as seen from its pilot.
#[derive(Debug, Clone, PartialEq)]
pub struct PilotCompetition {
    pub id: i32,
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    pub drone: Drone,
}

impl Pilot {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The pilot entity from the database
    /// - `competitions` - The pilot's competitions with their drones
    ///
    /// # Returns
    /// - `Ok(Pilot)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored gender code is neither `M` nor `F`
    pub fn from_entity(
        entity: entity::pilot::Model,
        competitions: Vec<PilotCompetition>,
    ) -> Result<Self, DbErr> {
        let gender = Gender::from_code(&entity.gender).ok_or_else(|| {
            DbErr::Custom(format!(
                "Invalid gender code '{}' for pilot {}",
                entity.gender, entity.id
            ))
        })?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            gender,
            races_count: entity.races_count,
            inserted_timestamp: entity.inserted_timestamp,
            competitions,
        })
    }

    pub fn into_dto(self, links: &LinkBuilder) -> PilotDto {
        PilotDto {
            url: links.pilot(self.id),
            name: self.name,
            gender: self.gender,
            gender_description: self.gender.description().to_string(),
            races_count: self.races_count,
            inserted_timestamp: self.inserted_timestamp,
            competitions: self
                .competitions
                .into_iter()
                .map(|competition| competition.into_dto(links))
                .collect(),
        }
    }
}

impl PilotCompetition {
    pub fn from_entity(entity: entity::competition::Model, drone: Drone) -> Self {
        Self {
            id: entity.id,
            distance_in_feet: entity.distance_in_feet,
            distance_achievement_date: entity.distance_achievement_date,
            drone,
        }
    }

    pub fn into_dto(self, links: &LinkBuilder) -> PilotCompetitionDto {
        PilotCompetitionDto {
            url: links.competition(self.id),
            id: self.id,
            distance_in_feet: self.distance_in_feet,
            distance_achievement_date: self.distance_achievement_date,
            drone: self.drone.into_dto(links),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePilotParams {
    pub name: String,
    pub gender: Gender,
    pub races_count: i32,
}

impl CreatePilotParams {
    pub fn from_dto(dto: CreatePilotDto) -> Self {
        Self {
            name: dto.name,
            gender: dto.gender,
            races_count: dto.races_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePilotParams {
    pub id: i32,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub races_count: Option<i32>,
}

impl UpdatePilotParams {
    /// Full replacement from a PUT body.
    pub fn replace(id: i32, dto: CreatePilotDto) -> Self {
        Self {
            id,
            name: Some(dto.name),
            gender: Some(dto.gender),
            races_count: Some(dto.races_count),
        }
    }

    /// Partial update from a PATCH body.
    pub fn from_dto(id: i32, dto: UpdatePilotDto) -> Self {
        Self {
            id,
            name: dto.name,
            gender: dto.gender,
            races_count: dto.races_count,
        }
    }
}
