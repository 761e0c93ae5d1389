//! `taskdeck rm` command.

use std::io::{self, Write};

use crate::board::Board;

/// Delete a task behind the confirmation gate.
///
/// Without `--yes` the user is prompted; anything but an explicit yes
/// cancels and changes nothing.
///
/// # Errors
///
/// Returns an error string if the board cannot be fetched, the task is
/// unknown, or the backend rejects the delete (the task is already
/// restored locally).
pub async fn run(board: &Board, id: &str, yes: bool) -> Result<(), String> {
    board.refresh().await.map_err(|e| format!("Failed to load the board: {e}"))?;
    let Some(confirmation) = board.request_delete(id) else {
        return Err(format!("Task {id} not found"));
    };
    let title = board.task(id).map_or_else(|| id.to_string(), |t| t.title);

    if !yes && !prompt(&title)? {
        confirmation.cancel();
        println!("Cancelled.");
        return Ok(());
    }

    board.confirm_delete(confirmation).await.map_err(|e| e.to_string())?;
    println!("Deleted '{title}'.");
    Ok(())
}

fn prompt(title: &str) -> Result<bool, String> {
    print!("Delete task '{title}'? [y/N] ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(|e| e.to_string())?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
