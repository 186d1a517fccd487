//! # minder-tasks
//!
//! Task lifecycle rules on top of `minder-store`:
//!
//! - **Lifecycle**: validation and defaulting for create/edit
//! - **Sweep**: one-shot reminders and automatic overdue transitions
//! - **Scheduler**: periodic sweep driver with cancellation
//! - **Stats**: counts by status and completion percentage

#![deny(unsafe_code)]

pub mod errors;
pub mod lifecycle;
pub mod scheduler;
pub mod stats;
pub mod sweep;

pub use errors::{Result, TaskError};
pub use lifecycle::{DATE_FORMAT, TaskDraft, build_fields, merge_draft, parse_stored_date};
pub use scheduler::{SchedulerExit, run_scheduler};
pub use stats::{TaskStats, compute_stats};
pub use sweep::{Reminder, SweepOutcome, run_sweep};
