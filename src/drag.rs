//! Drag-and-drop state machine for the board.
//!
//! A drag is a value, not a flag: [`ActiveDrag::begin`] (or
//! [`ActiveDrag::capture`]) starts one, and dropping or cancelling
//! consumes it. Finishing a drag that never started is therefore
//! unrepresentable, and the single-pointer gesture surface owns at most
//! one `ActiveDrag` at a time.

use crate::task::{Status, Task};

/// Where a drag ended: a column and a position inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Destination column.
    pub status: Status,
    /// Position within the destination column.
    pub index: usize,
}

/// The one mutation a drag can produce: move a task to another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeCommand {
    /// The dragged task.
    pub task_id: String,
    /// The destination column's status.
    pub new_status: Status,
}

/// Terminal outcome of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Ended outside any drop target, or exactly where it started.
    /// No mutation is emitted.
    Cancelled,
    /// Same column, different position: presentation-only. The new
    /// order is not persisted and will not survive a reload.
    Reordered {
        /// The column the task stayed in.
        status: Status,
        /// The new in-column position.
        index: usize,
    },
    /// Crossed into another column: a status mutation to commit.
    Moved(StatusChangeCommand),
}

/// An in-flight drag, holding the task's origin column and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    task_id: String,
    source_status: Status,
    source_index: usize,
}

impl ActiveDrag {
    /// Starts a drag from a known column position.
    #[must_use]
    pub fn begin(task_id: impl Into<String>, source_status: Status, source_index: usize) -> Self {
        Self { task_id: task_id.into(), source_status, source_index }
    }

    /// Starts a drag by locating the task in the given task set,
    /// capturing its current column and in-column index.
    ///
    /// Returns `None` if the task is not present (nothing to drag).
    #[must_use]
    pub fn capture(tasks: &[Task], task_id: &str) -> Option<Self> {
        let task = tasks.iter().find(|t| t.id == task_id)?;
        let index = tasks
            .iter()
            .filter(|t| t.status == task.status)
            .position(|t| t.id == task_id)?;
        Some(Self::begin(task_id, task.status, index))
    }

    /// The dragged task's id.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// The origin column and in-column index.
    #[must_use]
    pub fn source(&self) -> (Status, usize) {
        (self.source_status, self.source_index)
    }

    /// Ends the drag on `target` (or outside every target, with `None`),
    /// consuming it.
    ///
    /// Only a cross-column drop yields a [`StatusChangeCommand`];
    /// dropping at the exact origin cancels, and a same-column move to a
    /// different index is a visual reorder with no backend effect.
    #[must_use]
    pub fn drop_on(self, target: Option<DropTarget>) -> DropOutcome {
        let Some(target) = target else {
            return DropOutcome::Cancelled;
        };
        if target.status == self.source_status {
            if target.index == self.source_index {
                return DropOutcome::Cancelled;
            }
            return DropOutcome::Reordered { status: target.status, index: target.index };
        }
        DropOutcome::Moved(StatusChangeCommand {
            task_id: self.task_id,
            new_status: target.status,
        })
    }

    /// Abandons the drag, consuming it. Equivalent to dropping outside
    /// every target; kept as an explicit event for gesture surfaces
    /// that distinguish escape/blur from a drop.
    #[must_use]
    pub fn cancel(self) -> DropOutcome {
        DropOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;

    fn sample_task(id: &str, status: Status) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: None,
            status,
            priority: Priority::Medium,
            phase: None,
            due_date: None,
            assigned_to: None,
            dependencies: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn drop_outside_any_target_cancels() {
        let drag = ActiveDrag::begin("t1", Status::Todo, 0);
        assert_eq!(drag.drop_on(None), DropOutcome::Cancelled);
    }

    #[test]
    fn drop_at_origin_is_a_no_op() {
        let drag = ActiveDrag::begin("t1", Status::Todo, 2);
        let outcome = drag.drop_on(Some(DropTarget { status: Status::Todo, index: 2 }));
        assert_eq!(outcome, DropOutcome::Cancelled);
    }

    #[test]
    fn same_column_different_index_reorders_without_command() {
        let drag = ActiveDrag::begin("t1", Status::Todo, 0);
        let outcome = drag.drop_on(Some(DropTarget { status: Status::Todo, index: 3 }));
        assert_eq!(outcome, DropOutcome::Reordered { status: Status::Todo, index: 3 });
    }

    #[test]
    fn cross_column_drop_emits_exactly_one_status_change() {
        let drag = ActiveDrag::begin("t1", Status::Todo, 1);
        let outcome = drag.drop_on(Some(DropTarget { status: Status::Done, index: 0 }));
        assert_eq!(
            outcome,
            DropOutcome::Moved(StatusChangeCommand {
                task_id: "t1".into(),
                new_status: Status::Done,
            })
        );
    }

    #[test]
    fn explicit_cancel_emits_nothing() {
        let drag = ActiveDrag::begin("t1", Status::Hold, 0);
        assert_eq!(drag.cancel(), DropOutcome::Cancelled);
    }

    #[test]
    fn capture_records_column_local_index() {
        let tasks = vec![
            sample_task("a", Status::Todo),
            sample_task("b", Status::Done),
            sample_task("c", Status::Todo),
        ];
        // "c" is the second task of the todo column even though it is
        // third in store order.
        let drag = ActiveDrag::capture(&tasks, "c").unwrap();
        assert_eq!(drag.source(), (Status::Todo, 1));
        assert_eq!(drag.task_id(), "c");
    }

    #[test]
    fn capture_of_unknown_task_yields_nothing() {
        let tasks = vec![sample_task("a", Status::Todo)];
        assert!(ActiveDrag::capture(&tasks, "ghost").is_none());
    }
}
