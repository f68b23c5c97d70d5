use entity::{drone, drone_category};
use sea_orm::{
    sea_query::{Condition, Query},
    ColumnTrait,
};

use super::{
    value::ValueKind, FilterConfig, FilterField, FilterTarget, Lookup, SearchField, SortDirection,
};

pub static DRONE_FILTERS: FilterConfig<drone::Column> = FilterConfig {
    fields: &[
        FilterField {
            param: "name",
            kind: ValueKind::Text,
            target: FilterTarget::Column {
                column: drone::Column::Name,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "drone_category",
            kind: ValueKind::Integer,
            target: FilterTarget::Column {
                column: drone::Column::DroneCategoryId,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "manufacturing_date",
            kind: ValueKind::DateTime,
            target: FilterTarget::Column {
                column: drone::Column::ManufacturingDate,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "has_it_competed",
            kind: ValueKind::Boolean,
            target: FilterTarget::Column {
                column: drone::Column::HasItCompeted,
                lookup: Lookup::Exact,
            },
        },
    ],
    search: &[
        SearchField::Prefix(drone::Column::Name),
        SearchField::Related(category_name_contains),
    ],
    ordering: &[
        ("name", drone::Column::Name),
        ("manufacturing_date", drone::Column::ManufacturingDate),
    ],
    default_ordering: &[(drone::Column::Name, SortDirection::Asc)],
    tie_breaker: drone::Column::Id,
};

/// Drones whose category name contains `term`, ignoring ASCII case.
fn category_name_contains(term: &str) -> Condition {
    Condition::all().add(
        drone::Column::DroneCategoryId.in_subquery(
            Query::select()
                .column(drone_category::Column::Id)
                .from(drone_category::Entity)
                .and_where(drone_category::Column::Name.contains(term))
                .to_owned(),
        ),
    )
}
