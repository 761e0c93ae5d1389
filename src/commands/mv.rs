//! `taskdeck move` command.

use crate::board::Board;
use crate::task::Status;

/// Move a task to another status column.
///
/// Moving a task to the column it is already in changes nothing and
/// sends nothing.
///
/// # Errors
///
/// Returns an error string if the board cannot be fetched, the task is
/// unknown, or the backend rejects the move (the board has already
/// rolled back).
pub async fn run(board: &Board, id: &str, status: Status) -> Result<(), String> {
    board.refresh().await.map_err(|e| format!("Failed to load the board: {e}"))?;
    match board.move_task(id, status).await {
        Ok(Some(task)) => {
            println!("Moved '{}' to {}.", task.title, status.label());
            Ok(())
        }
        Ok(None) => {
            println!("Already in {}; nothing to do.", status.label());
            Ok(())
        }
        Err(err) => Err(err.to_string()),
    }
}
