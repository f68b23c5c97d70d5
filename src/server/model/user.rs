//! User domain model.
//!
//! Users are provisioned out-of-band and are read-only through the API.

use crate::{
    model::user::{UserDroneDto, UserDto},
    server::util::link::LinkBuilder,
};

/// User with the drones they own.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub drones: Vec<UserDrone>,
}

/// Drone as listed under its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDrone {
    pub id: i32,
    pub name: String,
}

impl User {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The user entity; its token never leaves the data layer
    /// - `drones` - Drones owned by the user
    pub fn from_entity(entity: entity::user::Model, drones: Vec<entity::drone::Model>) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            drones: drones
                .into_iter()
                .map(|drone| UserDrone {
                    id: drone.id,
                    name: drone.name,
                })
                .collect(),
        }
    }

    pub fn into_dto(self, links: &LinkBuilder) -> UserDto {
        UserDto {
            url: links.user(self.id),
            id: self.id,
            username: self.username,
            drones: self
                .drones
                .into_iter()
                .map(|drone| UserDroneDto {
                    url: links.drone(drone.id),
                    name: drone.name,
                })
                .collect(),
        }
    }
}
