//! Drone domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::drone::{CreateDroneDto, DroneDto, UpdateDroneDto},
    server::util::link::LinkBuilder,
};

/// Drone with its category name and owner resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub id: i32,
    pub name: String,
    pub drone_category_id: i32,
    pub category_name: String,
    pub owner_id: Option<i32>,
    pub owner_username: Option<String>,
    pub manufacturing_date: DateTime<Utc>,
    pub has_it_competed: bool,
    pub inserted_timestamp: DateTime<Utc>,
}

impl Drone {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The drone entity from the database
    /// - `category_name` - Name of the drone's category
    /// - `owner_username` - Username of the owner, `None` for unowned drones
    pub fn from_entity(
        entity: entity::drone::Model,
        category_name: String,
        owner_username: Option<String>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            drone_category_id: entity.drone_category_id,
            category_name,
            owner_id: entity.owner_id,
            owner_username,
            manufacturing_date: entity.manufacturing_date,
            has_it_competed: entity.has_it_competed,
            inserted_timestamp: entity.inserted_timestamp,
        }
    }

    pub fn into_dto(self, links: &LinkBuilder) -> DroneDto {
        DroneDto {
            url: links.drone(self.id),
            name: self.name,
            drone_category: self.category_name,
            owner: self.owner_username,
            manufacturing_date: self.manufacturing_date,
            has_it_competed: self.has_it_competed,
            inserted_timestamp: self.inserted_timestamp,
        }
    }
}

/// Parameters for registering a drone.
///
/// The category is referenced by name and resolved inside the write transaction.
#[derive(Debug, Clone)]
pub struct CreateDroneParams {
    pub name: String,
    pub category_name: String,
    pub manufacturing_date: DateTime<Utc>,
    pub has_it_competed: bool,
    /// Authenticated caller recorded as owner.
    pub owner_id: i32,
}

impl CreateDroneParams {
    pub fn from_dto(owner_id: i32, dto: CreateDroneDto) -> Self {
        Self {
            name: dto.name,
            category_name: dto.drone_category,
            manufacturing_date: dto.manufacturing_date,
            has_it_competed: dto.has_it_competed,
            owner_id,
        }
    }
}

/// Changes to apply to an existing drone; `None` leaves a field untouched.
///
/// The owner and insertion timestamp are not updatable.
#[derive(Debug, Clone)]
pub struct UpdateDroneParams {
    pub id: i32,
    pub name: Option<String>,
    pub category_name: Option<String>,
    pub manufacturing_date: Option<DateTime<Utc>>,
    pub has_it_competed: Option<bool>,
}

impl UpdateDroneParams {
    /// Full replacement from a PUT body.
    pub fn replace(id: i32, dto: CreateDroneDto) -> Self {
        Self {
            id,
            name: Some(dto.name),
            category_name: Some(dto.drone_category),
            manufacturing_date: Some(dto.manufacturing_date),
            has_it_competed: Some(dto.has_it_competed),
        }
    }

    /// Partial update from a PATCH body.
    pub fn from_dto(id: i32, dto: UpdateDroneDto) -> Self {
        Self {
            id,
            name: dto.name,
            category_name: dto.drone_category,
            manufacturing_date: dto.manufacturing_date,
            has_it_competed: dto.has_it_competed,
        }
    }
}
