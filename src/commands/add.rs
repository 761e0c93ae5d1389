//! `taskdeck add` command.

use chrono::NaiveDate;

use crate::board::{Board, SubmitError};
use crate::form::TaskForm;
use crate::task::{Priority, Status};

/// Parsed `add` arguments.
pub struct Args<'a> {
    /// Task title.
    pub title: &'a str,
    /// Optional description.
    pub description: Option<&'a str>,
    /// Column to create the task in.
    pub status: Status,
    /// Optional priority override (the form defaults to medium).
    pub priority: Option<Priority>,
    /// Optional phase label.
    pub phase: Option<&'a str>,
    /// Optional due date.
    pub due: Option<NaiveDate>,
    /// Optional assignee user id.
    pub assign: Option<&'a str>,
}

/// Create a task through the form controller.
///
/// # Errors
///
/// Returns an error string if validation blocks the draft (nothing is
/// sent) or the backend rejects the create.
pub async fn run(board: &Board, args: Args<'_>) -> Result<(), String> {
    let mut form = TaskForm::create(args.status);
    form.title = args.title.to_string();
    if let Some(description) = args.description {
        form.description = description.to_string();
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
    if let Some(phase) = args.phase {
        form.phase = phase.to_string();
    }
    form.due_date = args.due;
    form.assigned_to = args.assign.map(str::to_string);

    match board.submit(&mut form).await {
        Ok(task) => {
            println!("Created '{}' in {}.", task.title, task.status.label());
            Ok(())
        }
        Err(SubmitError::Invalid(err)) => Err(format!("Nothing sent: {err}")),
        Err(SubmitError::Mutation(err)) => Err(err.to_string()),
    }
}
