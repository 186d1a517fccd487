//! The notification sweep: reminders and automatic overdue transitions.
//!
//! A single sweep pass reads a snapshot of every task and, against a given
//! "today":
//!
//! - fires a one-shot reminder for each task whose `alert_date` is exactly
//!   today and whose status is not terminal, then clears the alert so it never
//!   fires again;
//! - marks `Overdue` each task whose `due_date` is strictly before today,
//!   unless the task is already `Overdue` or in a terminal state.
//!
//! All resulting mutations commit in one transaction. Malformed stored dates
//! are skipped for that field, with a debug log, and never abort the pass.
//! Running the sweep twice with the same date is a no-op the second time.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

use minder_store::{SweepChange, Task, TaskRepository, TaskStatus};

use crate::errors::Result;
use crate::lifecycle::parse_stored_date;

/// A reminder produced by the sweep, for delivery to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    /// Id of the task the reminder is for.
    pub task_id: i64,
    /// Title, for display.
    pub title: String,
}

/// Everything a single sweep pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Reminders that fired this pass, in task-id order.
    pub reminders: Vec<Reminder>,
    /// Ids of tasks newly marked overdue, in task-id order.
    pub marked_overdue: Vec<i64>,
}

impl SweepOutcome {
    /// Whether the pass changed nothing and fired nothing.
    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty() && self.marked_overdue.is_empty()
    }
}

/// Run one sweep pass against `today`.
///
/// Reads all tasks, computes the changes, and applies them in a single
/// transaction before returning. The reminders in the outcome are only
/// reported once their alert clears are durably committed.
pub fn run_sweep(conn: &Connection, today: NaiveDate) -> Result<SweepOutcome> {
    let tasks = TaskRepository::all(conn)?;

    let mut outcome = SweepOutcome::default();
    let mut changes: Vec<SweepChange> = Vec::new();

    for task in &tasks {
        check_alert(task, today, &mut outcome, &mut changes);
        check_due(task, today, &mut outcome, &mut changes);
    }

    TaskRepository::apply_sweep(conn, &changes)?;
    Ok(outcome)
}

fn check_alert(
    task: &Task,
    today: NaiveDate,
    outcome: &mut SweepOutcome,
    changes: &mut Vec<SweepChange>,
) {
    let Some(raw) = task.alert_date.as_deref() else {
        return;
    };
    let Some(alert) = parse_stored_date(Some(raw)) else {
        debug!(id = task.id, value = raw, "skipping malformed alert date");
        return;
    };

    if alert == today && !task.status.is_terminal() {
        outcome.reminders.push(Reminder {
            task_id: task.id,
            title: task.title.clone(),
        });
        changes.push(SweepChange::ClearAlert { id: task.id });
    }
}

fn check_due(
    task: &Task,
    today: NaiveDate,
    outcome: &mut SweepOutcome,
    changes: &mut Vec<SweepChange>,
) {
    if task.status == TaskStatus::Overdue || task.status.is_terminal() {
        return;
    }
    let Some(raw) = task.due_date.as_deref() else {
        return;
    };
    let Some(due) = parse_stored_date(Some(raw)) else {
        debug!(id = task.id, value = raw, "skipping malformed due date");
        return;
    };

    if due < today {
        outcome.marked_overdue.push(task.id);
        changes.push(SweepChange::MarkOverdue { id: task.id });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
