use thiserror::Error;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_FILL_REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required for new staff";

/// A required form field was left empty.
///
/// This is the only domain error. Handlers recover from it in place by
/// leaving state untouched and surfacing `message` as an error toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: &'static str,
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(message: &'static str, missing: Vec<&'static str>) -> Self {
        Self { message, missing }
    }
}

/// Collects the labels of blank fields, treating whitespace-only as blank.
pub fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect()
}
