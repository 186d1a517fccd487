//! Store error types.

use thiserror::Error;

/// Errors produced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task with the given id exists.
    #[error("task not found: {id}")]
    TaskNotFound {
        /// The id that was requested.
        id: i64,
    },
    /// Underlying `SQLite` failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to obtain a pooled connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    /// Schema migration failure.
    #[error("migration failed: {message}")]
    Migration {
        /// What went wrong, including the migration version.
        message: String,
    },
}

impl StoreError {
    /// Shorthand for [`StoreError::TaskNotFound`].
    pub fn task_not_found(id: i64) -> Self {
        Self::TaskNotFound { id }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
