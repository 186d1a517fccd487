//! # minder
//!
//! Personal task tracker binary — CRUD over a `SQLite` store plus a periodic
//! notification sweep (`minder run`) that fires reminders and marks overdue
//! tasks.

#![deny(unsafe_code)]

mod export;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use minder_settings::MinderSettings;
use minder_store::{
    ConnectionConfig, ConnectionPool, TaskFilter, TaskPriority, TaskRepository, TaskStatus,
    new_file, run_migrations,
};
use minder_tasks::{TaskDraft, build_fields, compute_stats, merge_draft, run_scheduler};

/// Personal task tracker.
#[derive(Parser, Debug)]
#[command(name = "minder", about = "Personal task tracker", version)]
struct Cli {
    /// Path to the `SQLite` database (overrides settings).
    #[arg(long)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new task.
    Add {
        /// Task title.
        title: String,
        /// Task description.
        description: String,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<String>,
        /// Reminder date (YYYY-MM-DD).
        #[arg(long)]
        alert: Option<String>,
        /// Initial status (default: in-progress).
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Priority (default: medium).
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    /// List tasks, optionally filtered.
    List {
        /// Only tasks with this status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Only tasks with this priority.
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Substring match against title or description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit fields of an existing task.
    Edit {
        /// Task id.
        id: i64,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New due date (YYYY-MM-DD; empty string clears it).
        #[arg(long)]
        due: Option<String>,
        /// New reminder date (YYYY-MM-DD; empty string clears it).
        #[arg(long)]
        alert: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority.
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        id: i64,
    },
    /// Show counts by status and completion percentage.
    Stats,
    /// Export all tasks to a CSV file.
    Export {
        /// Output file path.
        #[arg(long, default_value = "tasks.csv")]
        output: PathBuf,
    },
    /// Run the periodic notification sweep until interrupted.
    Run,
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn open_pool(db_path: &Path) -> Result<ConnectionPool> {
    ensure_parent_dir(db_path)?;
    let pool = new_file(
        db_path.to_string_lossy().as_ref(),
        &ConnectionConfig::default(),
    )
    .context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let _ = run_migrations(&conn).context("Failed to run migrations")?;
    }
    Ok(pool)
}

// ─────────────────────────────────────────────────────────────────────────────
// Command handlers
// ─────────────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_add(
    conn: &Connection,
    title: String,
    description: String,
    due: Option<String>,
    alert: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Result<i64> {
    let fields = build_fields(&TaskDraft {
        title,
        description,
        due_date: due,
        alert_date: alert,
        status,
        priority,
    })?;
    let task = TaskRepository::create(conn, &fields)?;
    println!("created task {}: {}", task.id, task.title);
    Ok(task.id)
}

fn cmd_list(conn: &Connection, filter: &TaskFilter) -> Result<usize> {
    let tasks = TaskRepository::list(conn, filter)?;
    for task in &tasks {
        println!(
            "{:>4}  [{:<11}] {:<6}  due:{:<10}  alert:{:<10}  {}",
            task.id,
            task.status,
            task.priority,
            task.due_date.as_deref().unwrap_or("-"),
            task.alert_date.as_deref().unwrap_or("-"),
            task.title,
        );
    }
    println!("{} task(s)", tasks.len());
    Ok(tasks.len())
}

#[allow(clippy::too_many_arguments)]
fn cmd_edit(
    conn: &Connection,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    alert: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Result<()> {
    let Some(current) = TaskRepository::get(conn, id)? else {
        bail!("task not found: {id}");
    };
    let draft = merge_draft(&current, title, description, due, alert, status, priority);
    let fields = build_fields(&draft)?;
    let task = TaskRepository::update(conn, id, &fields)?;
    println!("updated task {}: {}", task.id, task.title);
    Ok(())
}

fn cmd_delete(conn: &Connection, id: i64) -> Result<()> {
    TaskRepository::delete(conn, id)?;
    println!("deleted task {id}");
    Ok(())
}

fn cmd_stats(conn: &Connection) -> Result<()> {
    let stats = compute_stats(conn)?;
    println!("total: {}", stats.total);
    for (status, count) in &stats.counts_by_status {
        println!("  {status:<11} {count}");
    }
    match stats.completed_percent {
        Some(pct) => println!("completed: {pct}%"),
        None => println!("completed: n/a"),
    }
    Ok(())
}

fn cmd_export(conn: &Connection, output: &Path) -> Result<()> {
    let tasks = TaskRepository::all(conn)?;
    export::write_csv(output, &tasks)?;
    println!("exported {} task(s) to {}", tasks.len(), output.display());
    Ok(())
}

async fn cmd_run(pool: ConnectionPool, settings: &MinderSettings) -> Result<()> {
    let interval = Duration::from_millis(settings.sweep.interval_ms);
    let (tx, mut rx) = mpsc::channel(32);
    let cancel = CancellationToken::new();

    let scheduler = tokio::spawn(run_scheduler(pool, interval, tx, cancel.clone()));
    tracing::info!(interval_ms = settings.sweep.interval_ms, "sweep running, ctrl-c to stop");

    loop {
        tokio::select! {
            reminder = rx.recv() => {
                match reminder {
                    Some(reminder) => {
                        println!("reminder: [{}] {}", reminder.task_id, reminder.title);
                    }
                    None => break,
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for ctrl-c")?;
                tracing::info!("shutting down");
                cancel.cancel();
                break;
            }
        }
    }

    let exit = scheduler.await.context("scheduler task panicked")?;
    tracing::debug!(?exit, "scheduler stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let settings = minder_settings::load_settings().unwrap_or_default();
    let db_path = args
        .db_path
        .unwrap_or_else(|| PathBuf::from(&settings.db_path));
    let pool = open_pool(&db_path)?;

    match args.command {
        Command::Add {
            title,
            description,
            due,
            alert,
            status,
            priority,
        } => {
            let conn = pool.get()?;
            let _ = cmd_add(&conn, title, description, due, alert, status, priority)?;
        }
        Command::List {
            status,
            priority,
            search,
        } => {
            let conn = pool.get()?;
            let _ = cmd_list(
                &conn,
                &TaskFilter {
                    status,
                    priority,
                    search,
                },
            )?;
        }
        Command::Edit {
            id,
            title,
            description,
            due,
            alert,
            status,
            priority,
        } => {
            let conn = pool.get()?;
            cmd_edit(&conn, id, title, description, due, alert, status, priority)?;
        }
        Command::Delete { id } => {
            let conn = pool.get()?;
            cmd_delete(&conn, id)?;
        }
        Command::Stats => {
            let conn = pool.get()?;
            cmd_stats(&conn)?;
        }
        Command::Export { output } => {
            let conn = pool.get()?;
            cmd_export(&conn, &output)?;
        }
        Command::Run => {
            cmd_run(pool, &settings).await?;
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
