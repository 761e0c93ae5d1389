//! CLI argument definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::task::{Priority, Status};

/// Top-level CLI parser for `taskdeck`.
#[derive(Debug, Parser)]
#[command(name = "taskdeck", version, about = "Kanban board client for the project API")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the board grouped into status columns.
    Board,
    /// Create a task.
    Add {
        /// Task title.
        title: String,
        /// Longer description.
        #[arg(long)]
        description: Option<String>,
        /// Column the task starts in.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        status: Status,
        /// Priority (defaults to medium).
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Free-text phase label.
        #[arg(long)]
        phase: Option<String>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Assignee user id.
        #[arg(long)]
        assign: Option<String>,
    },
    /// Edit fields of an existing task.
    Edit {
        /// The task to edit.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description ("" clears it).
        #[arg(long)]
        description: Option<String>,
        /// New status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// New priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// New phase ("" clears it).
        #[arg(long)]
        phase: Option<String>,
        /// New due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New assignee user id ("" unassigns).
        #[arg(long)]
        assign: Option<String>,
    },
    /// Move a task to another column.
    Move {
        /// The task to move.
        id: String,
        /// Destination column.
        #[arg(value_enum)]
        status: Status,
    },
    /// Delete a task after confirmation.
    Rm {
        /// The task to delete.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
