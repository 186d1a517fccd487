//! Settings type definitions with serde defaults.
//!
//! Field names are camelCase in JSON. Every field carries a `#[serde(default)]`
//! so partial settings files deserialize cleanly after the deep merge.

use serde::{Deserialize, Serialize};

/// Top-level application settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinderSettings {
    /// Path to the `SQLite` task database.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Notification sweep settings.
    #[serde(default)]
    pub sweep: SweepSettings,
}

impl Default for MinderSettings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            sweep: SweepSettings::default(),
        }
    }
}

/// Settings for the periodic notification sweep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepSettings {
    /// Interval between sweep passes, in milliseconds.
    #[serde(default = "default_sweep_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_sweep_interval_ms(),
        }
    }
}

fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.minder/tasks.db")
}

fn default_sweep_interval_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = MinderSettings::default();
        assert!(settings.db_path.ends_with(".minder/tasks.db"));
        assert_eq!(settings.sweep.interval_ms, 10_000);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(MinderSettings::default()).unwrap();
        assert!(json.get("dbPath").is_some());
        assert!(json["sweep"].get("intervalMs").is_some());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: MinderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, MinderSettings::default());

        let settings: MinderSettings =
            serde_json::from_str(r#"{"sweep": {"intervalMs": 5000}}"#).unwrap();
        assert_eq!(settings.sweep.interval_ms, 5000);
        assert_eq!(settings.db_path, MinderSettings::default().db_path);
    }
}
