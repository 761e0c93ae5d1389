//! `taskdeck edit` command.

use chrono::NaiveDate;

use crate::board::{Board, SubmitError};
use crate::form::TaskForm;
use crate::task::{Priority, Status};

/// Parsed `edit` arguments. Every field is optional; absent fields keep
/// the task's current value.
pub struct Args<'a> {
    /// New title.
    pub title: Option<&'a str>,
    /// New description; an empty string clears it.
    pub description: Option<&'a str>,
    /// New status.
    pub status: Option<Status>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New phase; an empty string clears it.
    pub phase: Option<&'a str>,
    /// New due date.
    pub due: Option<NaiveDate>,
    /// New assignee user id; an empty string unassigns.
    pub assign: Option<&'a str>,
}

/// Edit a task through the form controller, seeded from its current
/// server-side state.
///
/// # Errors
///
/// Returns an error string if the board cannot be fetched, the task is
/// unknown, validation blocks the draft, or the backend rejects the
/// update.
pub async fn run(board: &Board, id: &str, args: Args<'_>) -> Result<(), String> {
    board.refresh().await.map_err(|e| format!("Failed to load the board: {e}"))?;
    let task = board.task(id).ok_or_else(|| format!("Task {id} not found"))?;

    let mut form = TaskForm::edit(&task);
    if let Some(title) = args.title {
        form.title = title.to_string();
    }
    if let Some(description) = args.description {
        form.description = description.to_string();
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
    if let Some(phase) = args.phase {
        form.phase = phase.to_string();
    }
    if let Some(due) = args.due {
        form.due_date = Some(due);
    }
    match args.assign {
        Some("") => form.assigned_to = None,
        Some(user_id) => form.assigned_to = Some(user_id.to_string()),
        None => {}
    }

    match board.submit(&mut form).await {
        Ok(task) => {
            println!("Updated '{}'.", task.title);
            Ok(())
        }
        Err(SubmitError::Invalid(err)) => Err(format!("Nothing sent: {err}")),
        Err(SubmitError::Mutation(err)) => Err(err.to_string()),
    }
}
