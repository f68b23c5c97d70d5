use entity::drone_category;

use super::{
    value::ValueKind, FilterConfig, FilterField, FilterTarget, Lookup, SearchField, SortDirection,
};

pub static CATEGORY_FILTERS: FilterConfig<drone_category::Column> = FilterConfig {
    fields: &[FilterField {
        param: "name",
        kind: ValueKind::Text,
        target: FilterTarget::Column {
            column: drone_category::Column::Name,
            lookup: Lookup::Exact,
        },
    }],
    search: &[SearchField::Prefix(drone_category::Column::Name)],
    ordering: &[("name", drone_category::Column::Name)],
    default_ordering: &[(drone_category::Column::Name, SortDirection::Asc)],
    tie_breaker: drone_category::Column::Id,
};
