//! Pure projection of the task cache into status columns.
//!
//! Derivable from the store alone: nothing is cached here, and the
//! projection is cheap enough to recompute on every render (one pass
//! over the tasks).

use crate::task::{Status, Task};

/// One status column: the status key plus the tasks that carry it,
/// in store iteration order.
#[derive(Debug)]
pub struct Column<'a> {
    /// The status every task in this column carries.
    pub status: Status,
    /// Borrowed tasks, in store order. No sorting is applied.
    pub tasks: Vec<&'a Task>,
}

/// The four columns in display order: todo, in-progress, done, hold.
#[derive(Debug)]
pub struct BoardColumns<'a> {
    columns: Vec<Column<'a>>,
}

impl<'a> BoardColumns<'a> {
    /// All columns in display order. Empty columns are present.
    #[must_use]
    pub fn all(&self) -> &[Column<'a>] {
        &self.columns
    }

    /// The column for one status.
    #[must_use]
    pub fn get(&self, status: Status) -> &Column<'a> {
        // DISPLAY_ORDER covers the whole enumeration, so the lookup
        // cannot miss.
        self.columns
            .iter()
            .find(|c| c.status == status)
            .expect("every status has a column")
    }

    /// Total task count across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// Groups tasks into status columns.
///
/// Every status in [`Status::DISPLAY_ORDER`] gets a column; each task
/// lands in exactly the column matching its status, preserving the
/// input order within the column.
#[must_use]
pub fn project(tasks: &[Task]) -> BoardColumns<'_> {
    let mut columns: Vec<Column<'_>> = Status::DISPLAY_ORDER
        .iter()
        .map(|&status| Column { status, tasks: Vec::new() })
        .collect();
    for task in tasks {
        if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
            column.tasks.push(task);
        }
    }
    BoardColumns { columns }
}
