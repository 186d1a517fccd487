//! Aggregate statistics over the task table.

use std::collections::BTreeMap;

use rusqlite::Connection;

use minder_store::TaskStatus;

use crate::errors::Result;

/// Snapshot of task counts at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of tasks.
    pub total: u64,
    /// Count per status. Statuses with zero tasks are present with count 0.
    pub counts_by_status: BTreeMap<TaskStatus, u64>,
    /// Completed share as a whole percentage, rounded down.
    /// `None` when the store is empty (no meaningful percentage).
    pub completed_percent: Option<u8>,
}

/// Compute statistics from the current table contents.
///
/// One `GROUP BY` query; counts are consistent with a single read snapshot.
pub fn compute_stats(conn: &Connection) -> Result<TaskStats> {
    let mut counts: BTreeMap<TaskStatus, u64> =
        TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();

    let mut stmt = conn
        .prepare("SELECT status, COUNT(*) FROM tasks GROUP BY status")
        .map_err(minder_store::StoreError::from)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })
        .map_err(minder_store::StoreError::from)?;

    for row in rows {
        let (status_str, count) = row.map_err(minder_store::StoreError::from)?;
        let status = TaskStatus::from_sql(&status_str);
        *counts.entry(status).or_insert(0) += count;
    }

    let total: u64 = counts.values().sum();
    let completed = counts.get(&TaskStatus::Completed).copied().unwrap_or(0);

    #[allow(clippy::cast_possible_truncation)]
    let completed_percent = if total == 0 {
        None
    } else {
        Some((completed * 100 / total) as u8)
    };

    Ok(TaskStats {
        total,
        counts_by_status: counts,
        completed_percent,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
