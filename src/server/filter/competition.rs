//! Competition filters.
//!
//! Dates and distances are exposed as inclusive ranges under their own parameter names.
//! Pilot and drone are matched by exact name through their relationship.

use entity::{competition, drone, pilot};
use sea_orm::{
    sea_query::{Condition, Query},
    ColumnTrait,
};

use super::{
    value::{FilterValue, ValueKind},
    FilterConfig, FilterField, FilterTarget, Lookup, SortDirection,
};

pub static COMPETITION_FILTERS: FilterConfig<competition::Column> = FilterConfig {
    fields: &[
        FilterField {
            param: "distance_in_feet",
            kind: ValueKind::Integer,
            target: FilterTarget::Column {
                column: competition::Column::DistanceInFeet,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "from_achievement_date",
            kind: ValueKind::DateTime,
            target: FilterTarget::Column {
                column: competition::Column::DistanceAchievementDate,
                lookup: Lookup::Gte,
            },
        },
        FilterField {
            param: "to_achievement_date",
            kind: ValueKind::DateTime,
            target: FilterTarget::Column {
                column: competition::Column::DistanceAchievementDate,
                lookup: Lookup::Lte,
            },
        },
        FilterField {
            param: "min_distance_in_feet",
            kind: ValueKind::Integer,
            target: FilterTarget::Column {
                column: competition::Column::DistanceInFeet,
                lookup: Lookup::Gte,
            },
        },
        FilterField {
            param: "max_distance_in_feet",
            kind: ValueKind::Integer,
            target: FilterTarget::Column {
                column: competition::Column::DistanceInFeet,
                lookup: Lookup::Lte,
            },
        },
        FilterField {
            param: "drone_name",
            kind: ValueKind::Text,
            target: FilterTarget::Related(drone_named),
        },
        FilterField {
            param: "pilot_name",
            kind: ValueKind::Text,
            target: FilterTarget::Related(pilot_named),
        },
    ],
    search: &[],
    ordering: &[
        ("distance_in_feet", competition::Column::DistanceInFeet),
        (
            "distance_achievement_date",
            competition::Column::DistanceAchievementDate,
        ),
    ],
    default_ordering: &[(competition::Column::DistanceInFeet, SortDirection::Desc)],
    tie_breaker: competition::Column::Id,
};

fn drone_named(name: FilterValue) -> Condition {
    Condition::all().add(
        competition::Column::DroneId.in_subquery(
            Query::select()
                .column(drone::Column::Id)
                .from(drone::Entity)
                .and_where(drone::Column::Name.eq(name))
                .to_owned(),
        ),
    )
}

fn pilot_named(name: FilterValue) -> Condition {
    Condition::all().add(
        competition::Column::PilotId.in_subquery(
            Query::select()
                .column(pilot::Column::Id)
                .from(pilot::Entity)
                .and_where(pilot::Column::Name.eq(name))
                .to_owned(),
        ),
    )
}
