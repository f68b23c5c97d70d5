//! Drone category domain models and parameters.

use crate::{
    model::category::{CreateDroneCategoryDto, DroneCategoryDto, UpdateDroneCategoryDto},
    server::util::link::LinkBuilder,
};

/// Drone category with the ids of its drones.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneCategory {
    pub id: i32,
    pub name: String,
    /// Ids of the drones in this category, ordered by drone name.
    pub drone_ids: Vec<i32>,
}

impl DroneCategory {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The drone category entity from the database
    /// - `drone_ids` - Ids of the drones in the category
    pub fn from_entity(entity: entity::drone_category::Model, drone_ids: Vec<i32>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            drone_ids,
        }
    }

    pub fn into_dto(self, links: &LinkBuilder) -> DroneCategoryDto {
        DroneCategoryDto {
            url: links.category(self.id),
            id: self.id,
            name: self.name,
            drones: self.drone_ids.into_iter().map(|id| links.drone(id)).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateDroneCategoryParams {
    pub name: String,
}

impl CreateDroneCategoryParams {
    pub fn from_dto(dto: CreateDroneCategoryDto) -> Self {
        Self { name: dto.name }
    }
}

/// Changes to apply to an existing category; `None` leaves a field untouched.
#[derive(Debug, Clone)]
pub struct UpdateDroneCategoryParams {
    pub id: i32,
    pub name: Option<String>,
}

impl UpdateDroneCategoryParams {
    /// Full replacement from a PUT body.
    pub fn replace(id: i32, dto: CreateDroneCategoryDto) -> Self {
        Self {
            id,
            name: Some(dto.name),
        }
    }

    /// Partial update from a PATCH body.
    pub fn from_dto(id: i32, dto: UpdateDroneCategoryDto) -> Self {
        Self { id, name: dto.name }
    }
}
