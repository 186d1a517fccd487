//! Input validation and the create/edit rules for tasks.
//!
//! This layer sits between user input and the repository: every field set
//! that reaches the store has passed through [`build_fields`]. The repository
//! itself never re-validates, so this is the single place the rules live.
//!
//! Rules:
//! - `title` and `description` are trimmed and must be non-empty.
//! - Dates must be real calendar dates in `YYYY-MM-DD` form; empty or
//!   whitespace-only input means "no date".
//! - New tasks default to `InProgress` status and `Medium` priority.
//! - Edits are full replacements — the caller merges unchanged fields from
//!   the current record before validating.

use chrono::NaiveDate;
use minder_store::{Task, TaskFields, TaskPriority, TaskStatus};

use crate::errors::{Result, TaskError};

/// The date form accepted everywhere: ISO `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated user input for creating or editing a task.
///
/// `None` for status/priority means "use the default" on create; on edit the
/// caller fills them from the current record first (see [`merge_draft`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed.
    pub description: String,
    /// Due date as typed, if provided.
    pub due_date: Option<String>,
    /// Alert date as typed, if provided.
    pub alert_date: Option<String>,
    /// Requested status, or default.
    pub status: Option<TaskStatus>,
    /// Requested priority, or default.
    pub priority: Option<TaskPriority>,
}

/// Validate a draft into a persistable field set.
///
/// # Errors
///
/// [`TaskError::MissingField`] if title or description is blank,
/// [`TaskError::InvalidDateFormat`] if a non-empty date fails to parse.
pub fn build_fields(draft: &TaskDraft) -> Result<TaskFields> {
    let title = validate_required("title", &draft.title)?;
    let description = validate_required("description", &draft.description)?;
    let due_date = validate_date(draft.due_date.as_deref())?;
    let alert_date = validate_date(draft.alert_date.as_deref())?;

    Ok(TaskFields {
        title,
        description,
        due_date,
        alert_date,
        status: draft.status.unwrap_or_default(),
        priority: draft.priority.unwrap_or_default(),
    })
}

/// Build an edit draft by laying partial changes over the current record.
///
/// Fields the user did not touch carry over verbatim, including an existing
/// status of `Overdue` — editing a task does not reset what the sweep set
/// unless the user says so. Passing `Some(String::new())` for a date clears it.
pub fn merge_draft(
    current: &Task,
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    alert_date: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> TaskDraft {
    TaskDraft {
        title: title.unwrap_or_else(|| current.title.clone()),
        description: description.unwrap_or_else(|| current.description.clone()),
        due_date: due_date.or_else(|| current.due_date.clone()),
        alert_date: alert_date.or_else(|| current.alert_date.clone()),
        status: Some(status.unwrap_or(current.status)),
        priority: Some(priority.unwrap_or(current.priority)),
    }
}

/// Trim and require a non-empty value.
fn validate_required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional date input.
///
/// Empty or whitespace-only input normalizes to `None`. Anything else must
/// parse as a real calendar date, and is stored in canonical form.
fn validate_date(value: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| TaskError::invalid_date(trimmed))?;
    Ok(Some(date.format(DATE_FORMAT).to_string()))
}

/// Parse a stored date string, treating malformed values as absent.
///
/// Stored rows can carry dates that were never validated (imported data).
/// The sweep and any display logic go through this so bad values degrade to
/// "no date" instead of failing.
pub fn parse_stored_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), DATE_FORMAT).ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, description: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn build_fields_applies_defaults() {
        let fields = build_fields(&draft("Buy groceries", "Milk and eggs")).unwrap();
        assert_eq!(fields.status, TaskStatus::InProgress);
        assert_eq!(fields.priority, TaskPriority::Medium);
        assert!(fields.due_date.is_none());
        assert!(fields.alert_date.is_none());
    }

    #[test]
    fn build_fields_trims_text() {
        let fields = build_fields(&draft("  padded  ", "\tdesc\n")).unwrap();
        assert_eq!(fields.title, "padded");
        assert_eq!(fields.description, "desc");
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = build_fields(&draft("   ", "desc")).unwrap_err();
        assert!(matches!(err, TaskError::MissingField { field: "title" }));
    }

    #[test]
    fn blank_description_is_rejected() {
        let err = build_fields(&draft("title", "")).unwrap_err();
        assert!(matches!(
            err,
            TaskError::MissingField {
                field: "description"
            }
        ));
    }

    #[test]
    fn valid_dates_pass_through() {
        let mut d = draft("t", "d");
        d.due_date = Some("2025-01-31".to_string());
        d.alert_date = Some("2025-01-30".to_string());
        let fields = build_fields(&d).unwrap();
        assert_eq!(fields.due_date.as_deref(), Some("2025-01-31"));
        assert_eq!(fields.alert_date.as_deref(), Some("2025-01-30"));
    }

    #[test]
    fn empty_date_means_none() {
        let mut d = draft("t", "d");
        d.due_date = Some(String::new());
        d.alert_date = Some("   ".to_string());
        let fields = build_fields(&d).unwrap();
        assert!(fields.due_date.is_none());
        assert!(fields.alert_date.is_none());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for bad in ["2025-13-01", "2025-02-30", "31/01/2025", "tomorrow"] {
            let mut d = draft("t", "d");
            d.due_date = Some(bad.to_string());
            let err = build_fields(&d).unwrap_err();
            assert!(
                matches!(err, TaskError::InvalidDateFormat { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn leap_day_is_a_real_date() {
        let mut d = draft("t", "d");
        d.due_date = Some("2024-02-29".to_string());
        assert!(build_fields(&d).is_ok());

        d.due_date = Some("2025-02-29".to_string());
        assert!(build_fields(&d).is_err());
    }

    #[test]
    fn merge_draft_keeps_untouched_fields() {
        let current = Task {
            id: 3,
            title: "old title".to_string(),
            description: "old desc".to_string(),
            due_date: Some("2025-06-01".to_string()),
            alert_date: None,
            status: TaskStatus::Overdue,
            priority: TaskPriority::High,
        };
        let merged = merge_draft(
            &current,
            Some("new title".to_string()),
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(merged.title, "new title");
        assert_eq!(merged.description, "old desc");
        assert_eq!(merged.due_date.as_deref(), Some("2025-06-01"));
        // Overdue survives an unrelated edit
        assert_eq!(merged.status, Some(TaskStatus::Overdue));
        assert_eq!(merged.priority, Some(TaskPriority::High));
    }

    #[test]
    fn merge_draft_empty_string_clears_a_date() {
        let current = Task {
            id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            due_date: Some("2025-06-01".to_string()),
            alert_date: Some("2025-05-30".to_string()),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
        };
        let merged = merge_draft(&current, None, None, Some(String::new()), None, None, None);
        let fields = build_fields(&merged).unwrap();
        assert!(fields.due_date.is_none());
        assert_eq!(fields.alert_date.as_deref(), Some("2025-05-30"));
    }

    #[test]
    fn parse_stored_date_tolerates_garbage() {
        assert!(parse_stored_date(None).is_none());
        assert!(parse_stored_date(Some("not-a-date")).is_none());
        assert!(parse_stored_date(Some("")).is_none());
        assert_eq!(
            parse_stored_date(Some("2025-01-02")),
            NaiveDate::from_ymd_opt(2025, 1, 2)
        );
    }
}
