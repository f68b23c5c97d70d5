use chrono::{DateTime, Utc};

use crate::{
    model::competition::{CompetitionDto, CreateCompetitionDto, UpdateCompetitionDto},
    server::util::link::LinkBuilder,
};

/// Competition result with the pilot and drone names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: i32,
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    pub pilot_name: String,
    pub drone_name: String,
}

impl Competition {
    pub fn from_entity(
        entity: entity::competition::Model,
        pilot_name: String,
        drone_name: String,
    ) -> Self {
        Self {
            id: entity.id,
            distance_in_feet: entity.distance_in_feet,
            distance_achievement_date: entity.distance_achievement_date,
            pilot_name,
            drone_name,
        }
    }

    pub fn into_dto(self, links: &LinkBuilder) -> CompetitionDto {
        CompetitionDto {
            url: links.competition(self.id),
            id: self.id,
            distance_in_feet: self.distance_in_feet,
            distance_achievement_date: self.distance_achievement_date,
            pilot: self.pilot_name,
            drone: self.drone_name,
        }
    }
}

/// Parameters for recording a competition; pilot and drone are referenced by name.
#[derive(Debug, Clone)]
pub struct CreateCompetitionParams {
    pub distance_in_feet: i32,
    pub distance_achievement_date: DateTime<Utc>,
    pub pilot_name: String,
    pub drone_name: String,
}

impl CreateCompetitionParams {
    pub fn from_dto(dto: CreateCompetitionDto) -> Self {
        Self {
            distance_in_feet: dto.distance_in_feet,
            distance_achievement_date: dto.distance_achievement_date,
            pilot_name: dto.pilot,
            drone_name: dto.drone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCompetitionParams {
    pub id: i32,
    pub distance_in_feet: Option<i32>,
    pub distance_achievement_date: Option<DateTime<Utc>>,
    pub pilot_name: Option<String>,
    pub drone_name: Option<String>,
}

impl UpdateCompetitionParams {
    /// Full replacement from a PUT body.
    pub fn replace(id: i32, dto: CreateCompetitionDto) -> Self {
        Self {
            id,
            distance_in_feet: Some(dto.distance_in_feet),
            distance_achievement_date: Some(dto.distance_achievement_date),
            pilot_name: Some(dto.pilot),
            drone_name: Some(dto.drone),
        }
    }

    /// Partial update from a PATCH body.
    pub fn from_dto(id: i32, dto: UpdateCompetitionDto) -> Self {
        Self {
            id,
            distance_in_feet: dto.distance_in_feet,
            distance_achievement_date: dto.distance_achievement_date,
            pilot_name: dto.pilot,
            drone_name: dto.drone,
        }
    }
}
