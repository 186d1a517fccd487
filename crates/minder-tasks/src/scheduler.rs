//! Periodic driver for the notification sweep.
//!
//! Runs [`run_sweep`](crate::sweep::run_sweep) at a fixed interval against
//! the local calendar date, forwarding fired reminders over a channel. The
//! loop owns no state beyond the pool handle; all persistence happens inside
//! the sweep itself.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use minder_store::ConnectionPool;

use crate::sweep::{Reminder, run_sweep};

/// Outcome of the scheduler loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerExit {
    /// The scheduler was cancelled externally.
    Cancelled,
    /// The reminder receiver was dropped; nobody is listening.
    Disconnected,
}

/// Run the sweep every `interval` until cancelled.
///
/// Each tick takes a pooled connection, sweeps against today's local date,
/// and sends any fired reminders to `reminders`. A failed sweep is logged and
/// the loop keeps going; the next tick retries naturally. Returns
/// [`SchedulerExit::Disconnected`] if the reminder channel closes.
pub async fn run_scheduler(
    pool: ConnectionPool,
    interval: Duration,
    reminders: mpsc::Sender<Reminder>,
    cancel: CancellationToken,
) -> SchedulerExit {
    let mut tick = time::interval(interval);
    tick.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let outcome = match pool.get() {
                    Ok(conn) => run_sweep(&conn, Local::now().date_naive()),
                    Err(e) => {
                        warn!(error = %e, "sweep skipped: no connection available");
                        continue;
                    }
                };

                match outcome {
                    Ok(outcome) => {
                        if !outcome.marked_overdue.is_empty() {
                            debug!(count = outcome.marked_overdue.len(), "tasks marked overdue");
                        }
                        for reminder in outcome.reminders {
                            if reminders.send(reminder).await.is_err() {
                                return SchedulerExit::Disconnected;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "sweep failed, will retry next tick");
                    }
                }
            }
            () = cancel.cancelled() => {
                return SchedulerExit::Cancelled;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use minder_store::{
        ConnectionConfig, TaskFields, TaskRepository, TaskStatus, new_file, run_migrations,
    };

    fn file_pool(dir: &tempfile::TempDir) -> ConnectionPool {
        let path = dir.path().join("sched.db");
        let pool = new_file(path.to_str().unwrap(), &ConnectionConfig::default()).unwrap();
        run_migrations(&pool.get().unwrap()).unwrap();
        pool
    }

    fn today_string() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    #[tokio::test]
    async fn scheduler_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        let (tx, _rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let cancel2 = cancel.clone();

        let handle = tokio::spawn(async move {
            run_scheduler(pool, Duration::from_secs(3600), tx, cancel2).await
        });

        cancel.cancel();
        assert_eq!(handle.await.unwrap(), SchedulerExit::Cancelled);
    }

    #[tokio::test]
    async fn scheduler_delivers_todays_reminders() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        {
            let conn = pool.get().unwrap();
            TaskRepository::create(
                &conn,
                &TaskFields {
                    title: "ping".to_string(),
                    description: "desc".to_string(),
                    alert_date: Some(today_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let cancel2 = cancel.clone();

        let handle = tokio::spawn(async move {
            // first tick fires immediately
            run_scheduler(pool, Duration::from_secs(3600), tx, cancel2).await
        });

        let reminder = rx.recv().await.unwrap();
        assert_eq!(reminder.title, "ping");

        cancel.cancel();
        assert_eq!(handle.await.unwrap(), SchedulerExit::Cancelled);
    }

    #[tokio::test]
    async fn scheduler_detects_dropped_receiver() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        {
            let conn = pool.get().unwrap();
            TaskRepository::create(
                &conn,
                &TaskFields {
                    title: "unheard".to_string(),
                    description: "desc".to_string(),
                    alert_date: Some(today_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let cancel = CancellationToken::new();

        let exit = run_scheduler(pool, Duration::from_secs(3600), tx, cancel).await;
        assert_eq!(exit, SchedulerExit::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_marks_overdue_on_tick() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        let id = {
            let conn = pool.get().unwrap();
            TaskRepository::create(
                &conn,
                &TaskFields {
                    title: "late".to_string(),
                    description: "desc".to_string(),
                    due_date: Some("2000-01-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .id
        };

        let (tx, _rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let cancel2 = cancel.clone();
        let pool2 = pool.clone();

        let handle = tokio::spawn(async move {
            run_scheduler(pool2, Duration::from_millis(10), tx, cancel2).await
        });

        // let the first tick run
        tokio::task::yield_now().await;
        time::sleep(Duration::from_millis(50)).await;

        cancel.cancel();
        handle.await.unwrap();

        let conn = pool.get().unwrap();
        let task = TaskRepository::get(&conn, id).unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Overdue);
    }

    #[test]
    fn exit_variants_compare() {
        assert_eq!(SchedulerExit::Cancelled, SchedulerExit::Cancelled);
        assert_ne!(SchedulerExit::Cancelled, SchedulerExit::Disconnected);
    }
}
