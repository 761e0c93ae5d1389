//! `taskdeck board` command.

use chrono::{Local, NaiveDate};

use crate::board::Board;
use crate::columns::project;
use crate::task::{format_due_relative, Task};

/// Fetch the project's tasks and print them as status columns.
///
/// # Errors
///
/// Returns an error string if the task list cannot be fetched.
pub async fn run(board: &Board) -> Result<(), String> {
    board.refresh().await.map_err(|e| format!("Failed to load the board: {e}"))?;
    let tasks = board.snapshot();
    let columns = project(&tasks);
    let today = Local::now().date_naive();

    for column in columns.all() {
        println!("{} ({})", column.status.label(), column.tasks.len());
        if column.tasks.is_empty() {
            println!("  (no tasks)");
        }
        for task in &column.tasks {
            println!("  {}", format_card(task, today));
        }
        println!();
    }
    Ok(())
}

/// One board card on a single line: priority, short id, title, and the
/// badges the full UI shows (due date, assignee initials, dependency
/// count).
fn format_card(task: &Task, today: NaiveDate) -> String {
    let mut line = format!("[{}] {}  {}", task.priority.label(), short_id(&task.id), task.title);
    let mut badges = Vec::new();
    if task.due_date.is_some() {
        badges.push(format!("due {}", format_due_relative(task.due_date, today)));
    }
    if let Some(user) = &task.assigned_to {
        badges.push(user.initials());
    }
    if !task.dependencies.is_empty() {
        badges.push(format!("{} deps", task.dependencies.len()));
    }
    if !badges.is_empty() {
        line.push_str(&format!("  ({})", badges.join(", ")));
    }
    line
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
