use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::Value;

use crate::server::error::filter::FilterError;

/// Accepted shape of a filter parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Boolean,
    DateTime,
    /// `M` or `F`.
    Gender,
}

impl ValueKind {
    fn expected(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Boolean => "true or false",
            Self::DateTime => "a date or date-time",
            Self::Gender => "M or F",
        }
    }
}

/// Parsed filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Text(text) => text.into(),
            FilterValue::Integer(number) => number.into(),
            FilterValue::Boolean(flag) => flag.into(),
            FilterValue::DateTime(date) => date.into(),
        }
    }
}

impl FilterValue {
    /// Parses a raw query value according to `kind`.
    ///
    /// # Arguments
    /// - `param` - Parameter name, for error reporting
    /// - `raw` - Raw value from the query string
    /// - `kind` - Expected shape
    ///
    /// # Returns
    /// - `Ok(FilterValue)` - Parsed value
    /// - `Err(FilterError::InvalidValue)` - `raw` does not have the expected shape
    pub fn parse(param: &str, raw: &str, kind: ValueKind) -> Result<Self, FilterError> {
        let parsed = match kind {
            ValueKind::Text => Some(Self::Text(raw.to_string())),
            ValueKind::Integer => raw.trim().parse::<i64>().ok().map(Self::Integer),
            ValueKind::Boolean => parse_bool(raw).map(Self::Boolean),
            ValueKind::DateTime => parse_datetime(raw).map(Self::DateTime),
            ValueKind::Gender => matches!(raw, "M" | "F").then(|| Self::Text(raw.to_string())),
        };

        parsed.ok_or_else(|| FilterError::InvalidValue {
            param: param.to_string(),
            value: raw.to_string(),
            expected: kind.expected(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "True" | "1" => Some(true),
        "false" | "False" | "0" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` (UTC) and `YYYY-MM-DD` (midnight UTC).
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}
