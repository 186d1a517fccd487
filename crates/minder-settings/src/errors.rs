//! Error types for settings loading.

use thiserror::Error;

/// Errors from reading or parsing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON or does not match the schema.
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, SettingsError>;
