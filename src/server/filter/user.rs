use entity::user;

use super::{
    value::ValueKind, FilterConfig, FilterField, FilterTarget, Lookup, SearchField, SortDirection,
};

pub static USER_FILTERS: FilterConfig<user::Column> = FilterConfig {
    fields: &[FilterField {
        param: "username",
        kind: ValueKind::Text,
        target: FilterTarget::Column {
            column: user::Column::Username,
            lookup: Lookup::Exact,
        },
    }],
    search: &[SearchField::Prefix(user::Column::Username)],
    ordering: &[("username", user::Column::Username)],
    default_ordering: &[(user::Column::Username, SortDirection::Asc)],
    tie_breaker: user::Column::Id,
};
