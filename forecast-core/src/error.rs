use thiserror::Error;

/// Structural problems with a raw provider response.
///
/// These are fatal to a single normalization call. Gaps in the condition-code
/// vocabulary are not errors; see [`crate::icon::resolve_icon`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("forecast needs at least {required} days, provider returned {actual}")]
    NotEnoughDays { required: usize, actual: usize },

    #[error("required field `{field}` is missing from the provider response")]
    MissingField { field: String },

    #[error("field `{field}` is not a finite number: {value}")]
    NonFinite { field: String, value: f64 },

    #[error("field `{field}` holds a timestamp out of range: {value}")]
    TimestampOutOfRange { field: String, value: i64 },
}

impl ValidationError {
    /// Name of the offending field, if the error is about a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NotEnoughDays { .. } => None,
            ValidationError::MissingField { field }
            | ValidationError::NonFinite { field, .. }
            | ValidationError::TimestampOutOfRange { field, .. } => Some(field.as_str()),
        }
    }
}
