//! # minder-store
//!
//! Task record persistence over `SQLite`.
//!
//! - **Connection pool**: `r2d2` over `rusqlite` with WAL mode and pragmas
//! - **Migrations**: version-tracked, embedded SQL, idempotent runner
//! - **Repository**: CRUD plus filtered queries over the single `tasks` table
//!
//! Every mutating call commits before it returns; a read that starts after a
//! mutation returns always observes it.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod types;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::{Result, StoreError};
pub use migrations::run_migrations;
pub use repository::TaskRepository;
pub use types::{SweepChange, Task, TaskFields, TaskFilter, TaskPriority, TaskStatus};
