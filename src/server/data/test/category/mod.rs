use super::*;
use crate::server::{data::category::DroneCategoryRepository, model::category::CreateDroneCategoryParams};
use test_utils::factory::{drone::DroneFactory, drone_category::DroneCategoryFactory};

mod create;
mod list;
mod update;
