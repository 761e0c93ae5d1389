//! Task data model shared by the store, projection, and mutation layers.
//!
//! The model mirrors the backend's task schema: a status that determines
//! column membership, a priority, optional scheduling fields, and a
//! reference (not a copy) to the assigned user.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Board status of a task. Determines which column the task renders in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
    /// Parked, waiting on something external.
    Hold,
}

impl Status {
    /// All statuses in board display order.
    pub const DISPLAY_ORDER: [Status; 4] =
        [Status::Todo, Status::InProgress, Status::Done, Status::Hold];

    /// Human-readable column heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Hold => "On Hold",
        }
    }
}

impl fmt::Display for Status {
    /// The wire/CLI spelling: `todo`, `in-progress`, `done`, `hold`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Hold => "hold",
        };
        f.write_str(value)
    }
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocking other work.
    Critical,
}

impl Priority {
    /// Human-readable priority name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

/// Reference to the user a task is assigned to.
///
/// The board never mutates user data; it only renders the display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    /// The user's unique identifier.
    pub id: String,
    /// The user's display name.
    pub full_name: String,
}

impl UserRef {
    /// Up to two uppercase initials from the display name, for avatars.
    #[must_use]
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Opaque identifier assigned by the backend on creation.
    pub id: String,
    /// Non-empty title, at most 100 characters (enforced by the form).
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Column-determining status.
    pub status: Status,
    /// Priority classification.
    pub priority: Priority,
    /// Optional free-text phase label.
    pub phase: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional reference to the assigned user.
    pub assigned_to: Option<UserRef>,
    /// Ids of tasks this task depends on. Display-only; no cycle checks.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
#[must_use]
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let days = (d - today).num_days();
            if days == 0 {
                "today".into()
            } else if days == 1 {
                "tomorrow".into()
            } else if days > 1 {
                format!("in {days}d")
            } else {
                format!("{}d late", -days)
            }
        }
    }
}
