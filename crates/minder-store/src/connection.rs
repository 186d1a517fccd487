//! `SQLite` connection pool with WAL mode and a busy timeout.
//!
//! Uses `r2d2` pooling with the `r2d2_sqlite` backend. The [`PragmaCustomizer`]
//! runs on each new connection so every pooled connection carries the same
//! pragmas. Writes are serialized by `SQLite` itself; the busy timeout keeps
//! the periodic sweep and interactive edits from tripping over each other.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::{Result, StoreError};

/// Alias for the connection pool type.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Alias for a pooled connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Configuration for the connection pool.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Maximum pool size (default: 4 — one writer plus a few readers).
    pub pool_size: u32,
    /// Busy timeout in milliseconds (default: 5000).
    pub busy_timeout_ms: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            busy_timeout_ms: 5000,
        }
    }
}

/// Pragma customizer that runs on each new connection.
#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;\
             PRAGMA busy_timeout = {};\
             PRAGMA foreign_keys = ON;\
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))?;
        Ok(())
    }
}

/// Create an in-memory connection pool (for testing).
///
/// Note: each pooled connection opens its own private in-memory database, so
/// this is only useful for single-connection scenarios.
pub fn new_in_memory(config: &ConnectionConfig) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(std::time::Duration::from_secs(5))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build(manager)?;
    Ok(pool)
}

/// Create a file-backed connection pool.
pub fn new_file(path: &str, config: &ConnectionConfig) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(std::time::Duration::from_secs(5))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build(manager)?;
    Ok(pool)
}

/// Verify pragmas are set correctly on a connection.
pub fn verify_pragmas(conn: &Connection) -> Result<PragmaState> {
    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .map_err(StoreError::Sqlite)?;
    let busy_timeout_ms: u32 = conn
        .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
        .map_err(StoreError::Sqlite)?;
    Ok(PragmaState {
        journal_mode,
        busy_timeout_ms,
    })
}

/// Pragma state for verification.
#[derive(Debug)]
pub struct PragmaState {
    /// Journal mode (should be "wal" for file databases).
    pub journal_mode: String,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_pool_creates_successfully() {
        let config = ConnectionConfig::default();
        let pool = new_in_memory(&config).unwrap();
        let conn = pool.get().unwrap();
        let pragmas = verify_pragmas(&conn).unwrap();
        assert!(
            pragmas.journal_mode == "wal" || pragmas.journal_mode == "memory",
            "journal_mode should be wal or memory, got: {}",
            pragmas.journal_mode
        );
        assert_eq!(pragmas.busy_timeout_ms, 5000);
    }

    #[test]
    fn file_pool_creates_successfully() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let config = ConnectionConfig::default();
        let pool = new_file(path.to_str().unwrap(), &config).unwrap();
        let conn = pool.get().unwrap();
        let pragmas = verify_pragmas(&conn).unwrap();
        assert_eq!(pragmas.journal_mode, "wal");
    }

    #[test]
    fn custom_busy_timeout() {
        let config = ConnectionConfig {
            pool_size: 2,
            busy_timeout_ms: 10_000,
        };
        let pool = new_in_memory(&config).unwrap();
        assert_eq!(pool.max_size(), 2);
        let conn = pool.get().unwrap();
        assert_eq!(verify_pragmas(&conn).unwrap().busy_timeout_ms, 10_000);
    }

    #[test]
    fn default_config_values() {
        let config = ConnectionConfig::default();
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.busy_timeout_ms, 5000);
    }
}
