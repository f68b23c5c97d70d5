use crate::server::{
    filter::{
        category::CATEGORY_FILTERS, competition::COMPETITION_FILTERS, drone::DRONE_FILTERS,
        pilot::PILOT_FILTERS, user::USER_FILTERS,
    },
    util::{pagination::PageRequest, query::QueryParams},
};
use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod category;
mod drone;
mod pilot;
mod user;

/// Page large enough to hold every row a test creates.
fn all_rows() -> PageRequest {
    PageRequest {
        limit: 100,
        offset: 0,
    }
}

fn params(query: &str) -> QueryParams {
    QueryParams::parse(Some(query))
}
