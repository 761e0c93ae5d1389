//! Board facade: the single mutation funnel for front-ends.
//!
//! Owns the store and the coordinator, and exposes the handful of
//! operations a front-end (the CLI here, a richer UI elsewhere) needs:
//! refresh, read a snapshot, drag, submit a form, and delete behind the
//! confirmation gate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::confirm::DeleteConfirmation;
use crate::drag::{ActiveDrag, DropOutcome};
use crate::form::{FormSubmission, TaskForm, ValidationError};
use crate::mutation::{MutationCoordinator, MutationError};
use crate::ports::{ApiError, Notifier, TaskBackend, TaskPatch};
use crate::store::TaskStore;
use crate::task::{Status, Task};

/// Why a form submit did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft failed local validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backend rejected the mutation; the store was rolled back and
    /// the form keeps its draft with an inline error.
    #[error(transparent)]
    Mutation(MutationError),
}

/// A project's board: task cache plus the mutation path.
pub struct Board {
    store: Arc<Mutex<TaskStore>>,
    backend: Arc<dyn TaskBackend>,
    coordinator: MutationCoordinator,
}

impl Board {
    /// Builds a board over the given backend and notifier, starting
    /// with an empty cache.
    #[must_use]
    pub fn new(backend: Arc<dyn TaskBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let store = Arc::new(Mutex::new(TaskStore::new()));
        let coordinator = MutationCoordinator::new(store.clone(), backend.clone(), notifier);
        Self { store, backend, coordinator }
    }

    /// Replaces the cache with the backend's current task list.
    ///
    /// Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; the cache keeps its previous
    /// contents in that case.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let tasks = self.backend.list_tasks().await?;
        let count = tasks.len();
        self.store().load(tasks);
        debug!(count, "board refreshed");
        Ok(count)
    }

    /// A snapshot of all cached tasks, in store order. Feed it to
    /// [`crate::columns::project`] for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.store().all().to_vec()
    }

    /// One task by id, cloned out of the cache.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<Task> {
        self.store().get(id).cloned()
    }

    /// Starts a drag on a cached task, capturing its current column and
    /// index. `None` if the task is unknown.
    #[must_use]
    pub fn begin_drag(&self, task_id: &str) -> Option<ActiveDrag> {
        ActiveDrag::capture(self.store().all(), task_id)
    }

    /// Settles a finished drag. Only [`DropOutcome::Moved`] commits
    /// anything; cancellations and visual reorders change no state.
    ///
    /// # Errors
    ///
    /// Returns the commit failure for a cross-column move (the store is
    /// already rolled back).
    pub async fn settle_drop(&self, outcome: DropOutcome) -> Result<(), MutationError> {
        match outcome {
            DropOutcome::Cancelled | DropOutcome::Reordered { .. } => Ok(()),
            DropOutcome::Moved(command) => {
                self.coordinator
                    .update(&command.task_id, TaskPatch::status_change(command.new_status))
                    .await?;
                Ok(())
            }
        }
    }

    /// Moves a task to another column (the non-gesture path used by the
    /// CLI). Moving to the task's current column is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the commit failure, or [`MutationError::UnknownTask`]
    /// for an uncached id.
    pub async fn move_task(
        &self,
        task_id: &str,
        status: Status,
    ) -> Result<Option<Task>, MutationError> {
        let current = {
            let store = self.store();
            let Some(task) = store.get(task_id) else {
                return Err(MutationError::UnknownTask(task_id.to_string()));
            };
            task.status
        };
        if current == status {
            return Ok(None);
        }
        let task = self.coordinator.update(task_id, TaskPatch::status_change(status)).await?;
        Ok(Some(task))
    }

    /// Submits a form draft.
    ///
    /// On success the caller closes the form and drops the draft. On a
    /// backend failure the draft survives with an inline error so the
    /// user can retry; validation failures never reach the network.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Invalid`] for a draft that fails validation,
    /// [`SubmitError::Mutation`] for a backend failure.
    pub async fn submit(&self, form: &mut TaskForm) -> Result<Task, SubmitError> {
        let submission = match form.submission() {
            Ok(submission) => submission,
            Err(err) => {
                form.submit_failed(err.to_string());
                return Err(err.into());
            }
        };
        let result = match submission {
            FormSubmission::Create(request) => self.coordinator.create(request).await,
            FormSubmission::Update { task_id, patch } => {
                self.coordinator.update(&task_id, patch).await
            }
        };
        match result {
            Ok(task) => {
                form.clear_error();
                Ok(task)
            }
            Err(err) => {
                form.submit_failed(err.to_string());
                Err(SubmitError::Mutation(err))
            }
        }
    }

    /// Opens the delete confirmation gate for a cached task. `None` if
    /// the task is unknown (nothing to delete).
    #[must_use]
    pub fn request_delete(&self, task_id: &str) -> Option<DeleteConfirmation> {
        self.store().get(task_id)?;
        Some(DeleteConfirmation::request(task_id))
    }

    /// Runs the delete the user confirmed.
    ///
    /// # Errors
    ///
    /// Returns the commit failure (the task is already restored, or
    /// pruned if the server had lost it).
    pub async fn confirm_delete(
        &self,
        confirmation: DeleteConfirmation,
    ) -> Result<(), MutationError> {
        let task_id = confirmation.confirm();
        self.coordinator.delete(&task_id).await
    }

    fn store(&self) -> MutexGuard<'_, TaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
