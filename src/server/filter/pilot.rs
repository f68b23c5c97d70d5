use entity::pilot;

use super::{
    value::ValueKind, FilterConfig, FilterField, FilterTarget, Lookup, SearchField, SortDirection,
};

pub static PILOT_FILTERS: FilterConfig<pilot::Column> = FilterConfig {
    fields: &[
        FilterField {
            param: "name",
            kind: ValueKind::Text,
            target: FilterTarget::Column {
                column: pilot::Column::Name,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "gender",
            kind: ValueKind::Gender,
            target: FilterTarget::Column {
                column: pilot::Column::Gender,
                lookup: Lookup::Exact,
            },
        },
        FilterField {
            param: "races_count",
            kind: ValueKind::Integer,
            target: FilterTarget::Column {
                column: pilot::Column::RacesCount,
                lookup: Lookup::Exact,
            },
        },
    ],
    search: &[SearchField::Prefix(pilot::Column::Name)],
    ordering: &[
        ("name", pilot::Column::Name),
        ("races_count", pilot::Column::RacesCount),
    ],
    default_ordering: &[(pilot::Column::Name, SortDirection::Asc)],
    tie_breaker: pilot::Column::Id,
};
