//! SQL data access layer for task records.
//!
//! All methods take a `&Connection` parameter and are stateless — pure
//! functions that translate between Rust types and SQL. Every mutation is
//! committed before the call returns; `SQLite` autocommits single statements,
//! and [`TaskRepository::apply_sweep`] wraps its batch in one transaction.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::{Result, StoreError};
use crate::types::{SweepChange, Task, TaskFields, TaskFilter, TaskPriority, TaskStatus};

/// Treat empty strings as absent dates when reading rows.
fn normalize_date(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Task repository for SQL CRUD operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a new record and return it with its store-assigned id.
    pub fn create(conn: &Connection, fields: &TaskFields) -> Result<Task> {
        let _ = conn.execute(
            "INSERT INTO tasks (title, description, due_date, alert_date, status, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.title,
                fields.description,
                fields.due_date,
                fields.alert_date,
                fields.status.as_sql(),
                fields.priority.as_sql(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get(conn, id)?.ok_or_else(|| StoreError::task_not_found(id))
    }

    /// Get a task by id.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], |row| {
                Ok(task_from_row(row))
            })
            .optional()?;
        Ok(task)
    }

    /// Replace every mutable field of the record with `id`.
    ///
    /// The id itself is immutable. Returns the updated task, or
    /// [`StoreError::TaskNotFound`] if the id does not exist.
    pub fn update(conn: &Connection, id: i64, fields: &TaskFields) -> Result<Task> {
        let changed = conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3,
             alert_date = ?4, status = ?5, priority = ?6 WHERE id = ?7",
            params![
                fields.title,
                fields.description,
                fields.due_date,
                fields.alert_date,
                fields.status.as_sql(),
                fields.priority.as_sql(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::task_not_found(id));
        }

        Self::get(conn, id)?.ok_or_else(|| StoreError::task_not_found(id))
    }

    /// Delete a task by id. Fails with [`StoreError::TaskNotFound`] if absent;
    /// callers that tolerate "already gone" can match on that variant.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::task_not_found(id));
        }
        Ok(())
    }

    /// List tasks matching the filter, ordered by ascending id.
    ///
    /// Produces a snapshot — re-querying re-reads current state. Never
    /// mutates anything.
    pub fn list(conn: &Connection, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            values.push(Box::new(status.as_sql().to_string()));
        }
        if let Some(priority) = filter.priority {
            conditions.push("priority = ?");
            values.push(Box::new(priority.as_sql().to_string()));
        }
        if let Some(ref search) = filter.search {
            let text = search.trim();
            if !text.is_empty() {
                conditions
                    .push("(title LIKE '%' || ? || '%' OR description LIKE '%' || ? || '%')");
                values.push(Box::new(text.to_string()));
                values.push(Box::new(text.to_string()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM tasks {where_clause} ORDER BY id");
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            values.iter().map(AsRef::as_ref).collect();

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params_refs.as_slice(), |row| Ok(task_from_row(row)))?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(tasks)
    }

    /// All tasks in insertion order — [`Self::list`] with no filters.
    pub fn all(conn: &Connection) -> Result<Vec<Task>> {
        Self::list(conn, &TaskFilter::default())
    }

    /// Set only the status of a task. Used by the sweep.
    pub fn set_status(conn: &Connection, id: i64, status: TaskStatus) -> Result<()> {
        let changed = conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_sql(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::task_not_found(id));
        }
        Ok(())
    }

    /// Clear the alert date of a task. Used by the sweep after a reminder fires.
    pub fn clear_alert(conn: &Connection, id: i64) -> Result<()> {
        let changed = conn.execute("UPDATE tasks SET alert_date = NULL WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::task_not_found(id));
        }
        Ok(())
    }

    /// Apply a batch of sweep mutations in a single transaction.
    ///
    /// Either every change is durably committed before this returns, or none
    /// is. Only `status` and `alert_date` can be touched through this path.
    pub fn apply_sweep(conn: &Connection, changes: &[SweepChange]) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let tx = conn.unchecked_transaction()?;
        for change in changes {
            match *change {
                SweepChange::MarkOverdue { id } => {
                    Self::set_status(&tx, id, TaskStatus::Overdue)?;
                }
                SweepChange::ClearAlert { id } => {
                    Self::clear_alert(&tx, id)?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row converter
// ─────────────────────────────────────────────────────────────────────────────

fn task_from_row(row: &rusqlite::Row<'_>) -> Task {
    let status_str: String = row.get_unwrap("status");
    let priority_str: String = row.get_unwrap("priority");

    Task {
        id: row.get_unwrap("id"),
        title: row.get_unwrap("title"),
        description: row.get_unwrap("description"),
        due_date: normalize_date(row.get_unwrap("due_date")),
        alert_date: normalize_date(row.get_unwrap("alert_date")),
        status: TaskStatus::from_sql(&status_str),
        priority: TaskPriority::from_sql(&priority_str),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
