//! Task record types, enums with SQL wire forms, and filter configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
///
/// `Overdue` is set automatically by the notification sweep when a due date
/// passes; every other transition is user-initiated through edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet begun.
    NotStarted,
    /// Actively being worked on. The default for new tasks.
    InProgress,
    /// Finished.
    Completed,
    /// The due date passed while the task was still open.
    Overdue,
    /// Abandoned without completion.
    Cancelled,
}

impl TaskStatus {
    /// SQL string form.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the SQL string form. Unknown values fall back to `InProgress`
    /// so imported rows with an unrecognized status still load.
    pub fn from_sql(value: &str) -> Self {
        match value {
            "not_started" => Self::NotStarted,
            "completed" => Self::Completed,
            "overdue" => Self::Overdue,
            "cancelled" => Self::Cancelled,
            _ => Self::InProgress,
        }
    }

    /// Whether this status ends the task's life (no automatic transitions).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// All statuses, in display order.
    pub const ALL: [Self; 5] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Completed,
        Self::Overdue,
        Self::Cancelled,
    ];
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Importance of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal. The default.
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// SQL string form.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse the SQL string form. Unknown values fall back to `Medium`.
    pub fn from_sql(value: &str) -> Self {
        match value {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A persisted task record.
///
/// Dates are kept as raw `YYYY-MM-DD` strings rather than parsed values so
/// that imperfect historical rows load without error; parsing happens at the
/// validation and sweep boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned id, unique for the lifetime of the database.
    pub id: i64,
    /// Short summary line.
    pub title: String,
    /// Longer description of the work.
    pub description: String,
    /// Deadline date (`YYYY-MM-DD`), if any.
    pub due_date: Option<String>,
    /// One-shot reminder date (`YYYY-MM-DD`), cleared once fired.
    pub alert_date: Option<String>,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Importance.
    pub priority: TaskPriority,
}

/// Validated field set for an insert or a full-replace update.
///
/// Built by the lifecycle layer (`minder-tasks`); the repository never
/// re-validates. Edits replace every mutable field, so create and update
/// share this shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Valid `YYYY-MM-DD` or absent (empty input is normalized to `None`).
    pub due_date: Option<String>,
    /// Valid `YYYY-MM-DD` or absent.
    pub alert_date: Option<String>,
    /// Lifecycle state to persist.
    pub status: TaskStatus,
    /// Importance to persist.
    pub priority: TaskPriority,
}

/// Filter configuration for [`crate::TaskRepository::list`].
///
/// `None` means "any" for the enum fields; `search` is a case-insensitive
/// substring match against title OR description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status match, or any.
    pub status: Option<TaskStatus>,
    /// Exact priority match, or any.
    pub priority: Option<TaskPriority>,
    /// Substring over title or description.
    pub search: Option<String>,
}

/// A single field mutation scheduled by the notification sweep.
///
/// The sweep computes these against a snapshot and the repository applies
/// them in one transaction; no other field is ever touched by the sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SweepChange {
    /// Flip `status` to [`TaskStatus::Overdue`].
    MarkOverdue {
        /// Target task.
        id: i64,
    },
    /// Clear `alert_date` so the reminder does not re-fire.
    ClearAlert {
        /// Target task.
        id: i64,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_sql_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_sql(status.as_sql()), status);
        }
    }

    #[test]
    fn status_from_sql_unknown_defaults_to_in_progress() {
        assert_eq!(TaskStatus::from_sql(""), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_sql("garbage"), TaskStatus::InProgress);
    }

    #[test]
    fn status_from_str_accepts_dashes_and_case() {
        assert_eq!(
            "In-Progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "NOT_STARTED".parse::<TaskStatus>().unwrap(),
            TaskStatus::NotStarted
        );
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::Overdue.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(!TaskStatus::NotStarted.is_terminal());
    }

    #[test]
    fn priority_sql_round_trip() {
        for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
            assert_eq!(TaskPriority::from_sql(priority.as_sql()), priority);
        }
        assert_eq!(TaskPriority::from_sql("urgent"), TaskPriority::Medium);
    }

    #[test]
    fn defaults_match_creation_rules() {
        assert_eq!(TaskStatus::default(), TaskStatus::InProgress);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn filter_default_is_unfiltered() {
        let filter = TaskFilter::default();
        assert!(filter.status.is_none());
        assert!(filter.priority.is_none());
        assert!(filter.search.is_none());
    }
}
