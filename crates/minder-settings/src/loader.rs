//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`MinderSettings::default()`]
//! 2. If `~/.minder/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::MinderSettings;

/// Resolve the path to the settings file (`~/.minder/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".minder").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<MinderSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<MinderSettings> {
    let defaults = serde_json::to_value(MinderSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: MinderSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Integers must parse and fall within their range; invalid values are
/// ignored with a warning (fall back to file/default).
pub fn apply_env_overrides(settings: &mut MinderSettings) {
    if let Some(v) = read_env_string("MINDER_DB_PATH") {
        settings.db_path = v;
    }
    // 1s to 24h
    if let Some(v) = read_env_u64("MINDER_SWEEP_INTERVAL_MS", 1000, 86_400_000) {
        settings.sweep.interval_ms = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
