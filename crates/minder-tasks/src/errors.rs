//! Error types for the task lifecycle layer.

use thiserror::Error;

/// Errors from validation, the sweep, and statistics.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required text field was empty or whitespace-only.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A date input was not a real calendar date in `YYYY-MM-DD` form.
    #[error("invalid date (expected YYYY-MM-DD): {value}")]
    InvalidDateFormat {
        /// The rejected input, verbatim.
        value: String,
    },

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] minder_store::StoreError),
}

impl TaskError {
    /// Shorthand for a missing-field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Shorthand for an invalid-date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            value: value.into(),
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            TaskError::missing_field("title").to_string(),
            "missing required field: title"
        );
        assert_eq!(
            TaskError::invalid_date("2025-13-40").to_string(),
            "invalid date (expected YYYY-MM-DD): 2025-13-40"
        );
    }

    #[test]
    fn store_error_converts() {
        let err = TaskError::from(minder_store::StoreError::task_not_found(7));
        assert!(matches!(
            err,
            TaskError::Store(minder_store::StoreError::TaskNotFound { id: 7 })
        ));
    }
}
