//! Backend API port for a project's tasks.
//!
//! Abstracting the REST client keeps the engine testable against a
//! deterministic in-memory backend, and keeps transport concerns (wire
//! field names, auth headers) out of the core.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use thiserror::Error;

use crate::task::{Priority, Status, Task};

/// Boxed future type alias used by [`TaskBackend`] to keep the trait
/// dyn-compatible.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// What went wrong talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The task (or project) no longer exists server-side.
    #[error("not found on the server")]
    NotFound,
    /// The server refused the request for this user.
    #[error("permission denied by the server")]
    PermissionDenied,
    /// The request never completed (connection, DNS, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or the raw body.
        message: String,
    },
}

/// Request payload for creating a task. The backend assigns the id and
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTask {
    /// Task title (validated by the form before it gets here).
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Column the task starts in.
    pub status: Status,
    /// Priority classification.
    pub priority: Priority,
    /// Optional phase label.
    pub phase: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional assignee, referenced by user id.
    pub assigned_to: Option<String>,
}

/// A closed-field partial update. `None` leaves a field untouched;
/// for the optional fields, `Some(None)` clears the value.
///
/// Unknown fields do not exist by construction: this is the whole
/// update vocabulary the backend accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<Status>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New phase, or `Some(None)` to clear it.
    pub phase: Option<Option<String>>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New assignee user id, or `Some(None)` to unassign.
    pub assigned_to: Option<Option<String>>,
}

impl TaskPatch {
    /// The patch a cross-column drop produces: status only.
    #[must_use]
    pub fn status_change(status: Status) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a task in place.
    ///
    /// An assignee change by id keeps the known display name when the
    /// id is unchanged; otherwise the name stays blank until the
    /// server's authoritative response merges it in.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(phase) = &self.phase {
            task.phase = phase.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to = match assigned_to {
                None => None,
                Some(id) => match task.assigned_to.take() {
                    Some(current) if current.id == *id => Some(current),
                    _ => Some(crate::task::UserRef { id: id.clone(), full_name: String::new() }),
                },
            };
        }
    }
}

/// The backend's task operations for one project.
///
/// Implementations must map transport and HTTP failures onto
/// [`ApiError`]; callers never see raw transport errors.
pub trait TaskBackend: Send + Sync {
    /// Lists all tasks of the project, in the server's order.
    fn list_tasks(&self) -> BackendFuture<'_, Vec<Task>>;

    /// Creates a task and returns it with its assigned id and
    /// timestamps.
    fn create_task(&self, request: &CreateTask) -> BackendFuture<'_, Task>;

    /// Applies a partial update and returns the full updated task.
    fn update_task(&self, id: &str, patch: &TaskPatch) -> BackendFuture<'_, Task>;

    /// Deletes a task. Success has no body.
    fn delete_task(&self, id: &str) -> BackendFuture<'_, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::UserRef;
    use chrono::Utc;

    fn sample_task() -> Task {
        Task {
            id: "t1".into(),
            title: "Original".into(),
            description: Some("text".into()),
            status: Status::Todo,
            priority: Priority::Low,
            phase: Some("Build".into()),
            due_date: None,
            assigned_to: Some(UserRef { id: "u1".into(), full_name: "Ada Byron".into() }),
            dependencies: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut task = sample_task();
        let before = task.clone();
        TaskPatch::default().apply(&mut task);
        assert_eq!(task, before);
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn status_change_patch_touches_only_status() {
        let mut task = sample_task();
        let patch = TaskPatch::status_change(Status::Done);
        assert!(!patch.is_empty());
        patch.apply(&mut task);
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.title, "Original");
        assert_eq!(task.phase.as_deref(), Some("Build"));
    }

    #[test]
    fn some_none_clears_optional_fields() {
        let mut task = sample_task();
        let patch = TaskPatch {
            description: Some(None),
            phase: Some(None),
            assigned_to: Some(None),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);
        assert!(task.description.is_none());
        assert!(task.phase.is_none());
        assert!(task.assigned_to.is_none());
    }

    #[test]
    fn reassignment_keeps_name_only_for_the_same_user() {
        let mut task = sample_task();
        let same = TaskPatch { assigned_to: Some(Some("u1".into())), ..TaskPatch::default() };
        same.apply(&mut task);
        assert_eq!(task.assigned_to.as_ref().unwrap().full_name, "Ada Byron");

        let other = TaskPatch { assigned_to: Some(Some("u2".into())), ..TaskPatch::default() };
        other.apply(&mut task);
        let assignee = task.assigned_to.unwrap();
        assert_eq!(assignee.id, "u2");
        assert!(assignee.full_name.is_empty());
    }
}
