use thiserror::Error;

/// Errors raised while turning query parameters into store predicates.
///
/// Unknown parameters are ignored rather than reported; only recognised parameters with
/// unusable values end up here. Always results in 400 Bad Request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid value '{value}' for query parameter '{param}': expected {expected}.")]
    InvalidValue {
        param: String,
        value: String,
        expected: &'static str,
    },
}
