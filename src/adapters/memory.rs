//! Deterministic in-memory `TaskBackend` for tests and demos.
//!
//! Behaves like the live backend (assigns uuids and timestamps,
//! resolves assignees, answers not-found for unknown ids) without any
//! network. Failures can be scripted per task id, or for the next
//! create, to exercise rollback paths.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::ports::{ApiError, BackendFuture, CreateTask, TaskBackend, TaskPatch};
use crate::task::{Task, UserRef};

#[derive(Default)]
struct MemoryState {
    tasks: Vec<Task>,
    users: HashMap<String, UserRef>,
    task_failures: HashMap<String, ApiError>,
    create_failure: Option<ApiError>,
    request_count: usize,
}

/// In-memory stand-in for the project's task API.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-seeded with tasks (ids are kept as given).
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.lock_state();
            for task in &tasks {
                if let Some(user) = &task.assigned_to {
                    state.users.insert(user.id.clone(), user.clone());
                }
            }
            state.tasks = tasks;
        }
        backend
    }

    /// Registers a user so create/update requests can assign by id.
    pub fn register_user(&self, user: UserRef) {
        self.lock_state().users.insert(user.id.clone(), user);
    }

    /// Scripts a failure for the next call that touches `task_id`.
    pub fn fail_task(&self, task_id: &str, error: ApiError) {
        self.lock_state().task_failures.insert(task_id.to_string(), error);
    }

    /// Scripts a failure for the next create call.
    pub fn fail_next_create(&self, error: ApiError) {
        self.lock_state().create_failure = Some(error);
    }

    /// How many backend calls have been made (any operation).
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock_state().request_count
    }

    /// The backend's current tasks, for assertions.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock_state().tasks.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_assignee(
        state: &MemoryState,
        user_id: &str,
    ) -> Result<UserRef, ApiError> {
        state.users.get(user_id).cloned().ok_or(ApiError::Rejected {
            status: 422,
            message: format!("unknown user: {user_id}"),
        })
    }
}

impl TaskBackend for MemoryBackend {
    fn list_tasks(&self) -> BackendFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let mut state = self.lock_state();
            state.request_count += 1;
            Ok(state.tasks.clone())
        })
    }

    fn create_task(&self, request: &CreateTask) -> BackendFuture<'_, Task> {
        let request = request.clone();
        Box::pin(async move {
            let mut state = self.lock_state();
            state.request_count += 1;
            if let Some(error) = state.create_failure.take() {
                return Err(error);
            }
            let assigned_to = match &request.assigned_to {
                Some(user_id) => Some(Self::resolve_assignee(&state, user_id)?),
                None => None,
            };
            let now = Utc::now();
            let task = Task {
                id: Uuid::new_v4().to_string(),
                title: request.title,
                description: request.description,
                status: request.status,
                priority: request.priority,
                phase: request.phase,
                due_date: request.due_date,
                assigned_to,
                dependencies: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            state.tasks.push(task.clone());
            Ok(task)
        })
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> BackendFuture<'_, Task> {
        let id = id.to_string();
        let patch = patch.clone();
        Box::pin(async move {
            let mut state = self.lock_state();
            state.request_count += 1;
            if let Some(error) = state.task_failures.remove(&id) {
                return Err(error);
            }
            let assigned_to = match &patch.assigned_to {
                Some(Some(user_id)) => Some(Some(Self::resolve_assignee(&state, user_id)?)),
                Some(None) => Some(None),
                None => None,
            };
            let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
                return Err(ApiError::NotFound);
            };
            patch.apply(task);
            // The patch only carries the assignee id; fill in the full
            // reference the way the live backend would.
            if let Some(resolved) = assigned_to {
                task.assigned_to = resolved;
            }
            task.updated_at = Utc::now();
            Ok(task.clone())
        })
    }

    fn delete_task(&self, id: &str) -> BackendFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            let mut state = self.lock_state();
            state.request_count += 1;
            if let Some(error) = state.task_failures.remove(&id) {
                return Err(error);
            }
            let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
                return Err(ApiError::NotFound);
            };
            state.tasks.remove(index);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};

    fn create_request(title: &str) -> CreateTask {
        CreateTask {
            title: title.into(),
            description: None,
            status: Status::Todo,
            priority: Priority::Medium,
            phase: None,
            due_date: None,
            assigned_to: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let backend = MemoryBackend::new();
        let task = backend.create_task(&create_request("Design Review")).await.unwrap();
        assert!(!task.id.is_empty());
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(backend.tasks().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_task_is_not_found() {
        let backend = MemoryBackend::new();
        let result = backend.update_task("ghost", &TaskPatch::status_change(Status::Done)).await;
        assert_eq!(result.unwrap_err(), ApiError::NotFound);
    }

    #[tokio::test]
    async fn scripted_failure_fires_once() {
        let backend = MemoryBackend::new();
        let task = backend.create_task(&create_request("Design Review")).await.unwrap();
        backend.fail_task(&task.id, ApiError::Transport("boom".into()));

        let patch = TaskPatch::status_change(Status::Done);
        assert!(backend.update_task(&task.id, &patch).await.is_err());
        // The failure was consumed; the retry succeeds.
        assert!(backend.update_task(&task.id, &patch).await.is_ok());
    }

    #[tokio::test]
    async fn assignment_resolves_registered_users_only() {
        let backend = MemoryBackend::new();
        backend.register_user(UserRef { id: "u1".into(), full_name: "Ada Byron".into() });
        let task = backend.create_task(&create_request("Design Review")).await.unwrap();

        let assign = TaskPatch { assigned_to: Some(Some("u1".into())), ..TaskPatch::default() };
        let updated = backend.update_task(&task.id, &assign).await.unwrap();
        assert_eq!(updated.assigned_to.unwrap().full_name, "Ada Byron");

        let unknown = TaskPatch { assigned_to: Some(Some("u9".into())), ..TaskPatch::default() };
        let err = backend.update_task(&task.id, &unknown).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 422, .. }));
    }
}
