//! CSV export of the task table.

use std::path::Path;

use anyhow::{Context, Result};
use minder_store::Task;

/// Column headers, in output order.
const HEADERS: [&str; 6] = [
    "Title",
    "Description",
    "Due",
    "Alert",
    "Status",
    "Priority",
];

/// Write all given tasks to a CSV file at `path`.
///
/// Absent dates are written as empty cells. The writer handles quoting, so
/// titles with commas or newlines survive a round trip through a spreadsheet.
pub fn write_csv(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(HEADERS)?;
    for task in tasks {
        writer.write_record([
            task.title.as_str(),
            &task.description,
            task.due_date.as_deref().unwrap_or(""),
            task.alert_date.as_deref().unwrap_or(""),
            task.status.as_sql(),
            task.priority.as_sql(),
        ])?;
    }

    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}
