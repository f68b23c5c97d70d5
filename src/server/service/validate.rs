use crate::server::error::AppError;

/// Longest accepted drone and category name.
pub const MAX_NAME_LENGTH: usize = 250;
/// Longest accepted pilot name.
pub const MAX_PILOT_NAME_LENGTH: usize = 150;

/// Trims a name and checks it is neither blank nor longer than `max_length` characters.
///
/// # Arguments
/// - `field` - Field name used in the error message
/// - `value` - Submitted value
/// - `max_length` - Maximum length in characters
///
/// # Returns
/// - `Ok(String)` - Trimmed name
/// - `Err(AppError::BadRequest)` - Blank or too long
pub fn name(field: &str, value: String, max_length: usize) -> Result<String, AppError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!(
            "{}: This field may not be blank.",
            field
        )));
    }

    if trimmed.chars().count() > max_length {
        return Err(AppError::BadRequest(format!(
            "{}: Ensure this field has no more than {} characters.",
            field, max_length
        )));
    }

    Ok(trimmed.to_string())
}

/// Error for a reference to a related object that does not exist.
pub fn missing_reference(field: &str, name: &str) -> AppError {
    AppError::BadRequest(format!(
        "{}: Object with name={} does not exist.",
        field, name
    ))
}
