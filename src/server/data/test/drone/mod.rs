use super::*;
use crate::server::{
    data::drone::DroneRepository,
    model::drone::{CreateDroneParams, UpdateDroneParams},
};
use test_utils::factory::{
    drone::DroneFactory, drone_category::DroneCategoryFactory, helpers, user::UserFactory,
};

mod create;
mod delete;
mod get_by_id;
mod list;
mod update;
