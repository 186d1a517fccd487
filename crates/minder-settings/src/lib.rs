//! # minder-settings
//!
//! Application settings: compiled defaults, deep-merged with
//! `~/.minder/settings.json`, then environment variable overrides.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, load_settings, load_settings_from_path, settings_path};
pub use types::{MinderSettings, SweepSettings};
