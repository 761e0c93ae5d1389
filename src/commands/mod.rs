//! Command dispatch and handlers.

pub mod add;
pub mod board;
pub mod edit;
pub mod mv;
pub mod rm;

use std::sync::Arc;

use crate::adapters::http::HttpBackend;
use crate::adapters::notify::ConsoleNotifier;
use crate::board::Board;
use crate::cli::Command;
use crate::config::BoardConfig;
use crate::ports::{Notifier, TaskBackend};

/// Dispatch a parsed command to its handler.
///
/// Builds the live board (HTTP backend plus stderr notifier) from the
/// environment and runs the handler on a current-thread runtime; the
/// engine assumes one logical thread of control.
///
/// # Errors
///
/// Returns an error string if configuration is incomplete, the role
/// does not offer the requested action, or the handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = BoardConfig::from_env().map_err(|e| e.to_string())?;
    if mutates(command) && !config.role.can_manage_tasks() {
        return Err("your role does not offer task editing on this board".into());
    }

    let backend: Arc<dyn TaskBackend> = Arc::new(HttpBackend::new(&config));
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let board = Board::new(backend, notifier);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start the async runtime: {e}"))?;
    runtime.block_on(dispatch_on(command, &board))
}

/// Whether the command changes board state (and is therefore gated by
/// role affordances).
fn mutates(command: &Command) -> bool {
    !matches!(command, Command::Board)
}

async fn dispatch_on(command: &Command, board: &Board) -> Result<(), String> {
    match command {
        Command::Board => board::run(board).await,
        Command::Add { title, description, status, priority, phase, due, assign } => {
            add::run(
                board,
                add::Args {
                    title,
                    description: description.as_deref(),
                    status: *status,
                    priority: *priority,
                    phase: phase.as_deref(),
                    due: *due,
                    assign: assign.as_deref(),
                },
            )
            .await
        }
        Command::Edit { id, title, description, status, priority, phase, due, assign } => {
            edit::run(
                board,
                id,
                edit::Args {
                    title: title.as_deref(),
                    description: description.as_deref(),
                    status: *status,
                    priority: *priority,
                    phase: phase.as_deref(),
                    due: *due,
                    assign: assign.as_deref(),
                },
            )
            .await
        }
        Command::Move { id, status } => mv::run(board, id, *status).await,
        Command::Rm { id, yes } => rm::run(board, id, *yes).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_board_view_is_ungated() {
        assert!(!mutates(&Command::Board));
        assert!(mutates(&Command::Rm { id: "t1".into(), yes: true }));
        assert!(mutates(&Command::Move {
            id: "t1".into(),
            status: crate::task::Status::Done,
        }));
    }
}
