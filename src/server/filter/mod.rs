//! Query filter engine.
//!
//! Every list endpoint declares a static `FilterConfig` naming which query parameters it
//! understands: exact and range filters on its own columns, filters that hop one
//! relationship by the related entity's name, search fields and the ordering allow-list.
//! `FilterConfig::parse` turns a request's query string into a `ListQuery` holding a SeaORM
//! `Condition` and an `ORDER BY` list.
//!
//! Parameters that are not declared are ignored. A declared parameter with an unusable
//! value is a `FilterError`.

pub mod category;
pub mod competition;
pub mod drone;
pub mod pilot;
pub mod user;
pub mod value;

use sea_orm::{
    sea_query::Condition, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Select,
};

use crate::server::{error::filter::FilterError, util::query::QueryParams};

use self::value::{FilterValue, ValueKind};

pub const SEARCH_PARAM: &str = "search";
pub const ORDERING_PARAM: &str = "ordering";

/// Comparison applied to a column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    Gte,
    Lte,
}

/// What a filter parameter constrains.
pub enum FilterTarget<C> {
    /// A column of the listed entity.
    Column { column: C, lookup: Lookup },
    /// A predicate through a relationship, built from the parsed value.
    Related(fn(FilterValue) -> Condition),
}

/// A query parameter understood by a list endpoint.
pub struct FilterField<C> {
    pub param: &'static str,
    pub kind: ValueKind,
    pub target: FilterTarget<C>,
}

/// A field matched by `search` terms.
pub enum SearchField<C> {
    /// Case-sensitive prefix match on a text column.
    Prefix(C),
    /// A predicate through a relationship, built from one search term.
    Related(fn(&str) -> Condition),
}

/// Filter, search and ordering declaration of one list endpoint.
pub struct FilterConfig<C: 'static> {
    pub fields: &'static [FilterField<C>],
    pub search: &'static [SearchField<C>],
    /// Allow-listed `ordering` names and the columns they sort by.
    pub ordering: &'static [(&'static str, C)],
    pub default_ordering: &'static [(C, SortDirection)],
    /// Appended to every ordering so results are deterministic.
    pub tie_breaker: C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Predicate and ordering for one list request.
#[derive(Debug, Clone)]
pub struct ListQuery<C> {
    pub condition: Condition,
    pub ordering: Vec<(C, SortDirection)>,
}

impl<C: ColumnTrait> ListQuery<C> {
    /// Applies the predicate and ordering to a select over the matching entity.
    pub fn apply<E>(self, select: Select<E>) -> Select<E>
    where
        E: EntityTrait<Column = C>,
    {
        let mut select = select.filter(self.condition);
        for (column, direction) in self.ordering {
            select = select.order_by(column, direction.order());
        }
        select
    }
}

impl<C: ColumnTrait + 'static> FilterConfig<C> {
    /// Translates a query string into a `ListQuery`.
    ///
    /// # Arguments
    /// - `params` - Decoded query string of the request
    ///
    /// # Returns
    /// - `Ok(ListQuery)` - Combined predicate and ordering
    /// - `Err(FilterError::InvalidValue)` - A declared filter parameter has an unusable value
    pub fn parse(&self, params: &QueryParams) -> Result<ListQuery<C>, FilterError> {
        let mut condition = Condition::all();

        for field in self.fields {
            let Some(raw) = params.get(field.param) else {
                continue;
            };
            let value = FilterValue::parse(field.param, raw, field.kind)?;
            condition = condition.add(field_condition(&field.target, value));
        }

        if let Some(search) = params.get(SEARCH_PARAM) {
            for term in search_terms(search) {
                condition = condition.add(self.term_condition(term));
            }
        }

        Ok(ListQuery {
            condition,
            ordering: self.ordering(params.get(ORDERING_PARAM)),
        })
    }

    /// A term matches when any search field matches it.
    fn term_condition(&self, term: &str) -> Condition {
        self.search
            .iter()
            .fold(Condition::any(), |any, field| match field {
                SearchField::Prefix(column) => any.add(prefix_condition(*column, term)),
                SearchField::Related(build) => any.add(build(term)),
            })
    }

    fn ordering(&self, raw: Option<&str>) -> Vec<(C, SortDirection)> {
        let mut ordering: Vec<(C, SortDirection)> = raw
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter_map(|name| {
                        let (name, direction) = match name.strip_prefix('-') {
                            Some(name) => (name, SortDirection::Desc),
                            None => (name, SortDirection::Asc),
                        };
                        self.ordering
                            .iter()
                            .find(|(allowed, _)| *allowed == name)
                            .map(|(_, column)| (*column, direction))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if ordering.is_empty() {
            ordering.extend(self.default_ordering.iter().copied());
        }

        ordering.push((self.tie_breaker, SortDirection::Asc));
        ordering
    }
}

fn field_condition<C: ColumnTrait>(target: &FilterTarget<C>, value: FilterValue) -> Condition {
    match target {
        FilterTarget::Column { column, lookup } => {
            let expr = match lookup {
                Lookup::Exact => column.eq(value),
                Lookup::Gte => column.gte(value),
                Lookup::Lte => column.lte(value),
            };
            Condition::all().add(expr)
        }
        FilterTarget::Related(build) => build(value),
    }
}

/// Splits a search string into terms on whitespace and commas.
pub fn search_terms(search: &str) -> impl Iterator<Item = &str> {
    search
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
}

/// Case-sensitive prefix match expressed as a half-open range, `term <= col < successor`.
///
/// Binary collation compares strings code point by code point, so every string starting
/// with `term` sorts inside the range.
fn prefix_condition<C: ColumnTrait>(column: C, term: &str) -> Condition {
    let condition = Condition::all().add(column.gte(term));

    match prefix_successor(term) {
        Some(upper) => condition.add(column.lt(upper)),
        None => condition,
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// `None` when no such string exists, i.e. every character is `char::MAX`.
fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();

    while let Some(last) = chars.pop() {
        let next = (last as u32 + 1..=char::MAX as u32).find_map(char::from_u32);
        if let Some(next) = next {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }

    None
}
