use thiserror::Error;

/// Input rejected at the command boundary before it reaches the store.
#[derive(Debug, Error, PartialEq)]
pub enum ProgressError {
    #[error("Invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown list '{0}'")]
    UnknownListField(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{field} must be between 0 and 100, got {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("Tasbih target must be greater than zero")]
    InvalidTarget,
}
