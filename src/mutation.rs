//! Optimistic mutation coordination: apply locally, confirm remotely,
//! roll back on failure.
//!
//! Every store write funnels through the coordinator. A commit snapshots
//! the task, applies the change synchronously (so the board re-renders
//! at once), then awaits the backend. Success replaces the optimistic
//! entry with the server's authoritative task; failure restores the
//! snapshot exactly and raises a user-visible notice.
//!
//! Commits are independent per task id and never block one another. Two
//! commits against the *same* task are both sent; the backend's arrival
//! order (last write wins) decides the final state, and the client does
//! not serialize them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use crate::ports::{ApiError, CreateTask, Notice, Notifier, TaskBackend, TaskPatch};
use crate::store::TaskStore;
use crate::task::Task;

/// Why a commit did not confirm.
///
/// By the time a caller sees this, the store is already consistent: the
/// optimistic write has been rolled back (or the diverged task pruned)
/// and the user has been notified.
#[derive(Debug, Error)]
pub enum MutationError {
    /// The task is not in the local store, so there is nothing to
    /// mutate.
    #[error("task {0} is not in the local store")]
    UnknownTask(String),
    /// The backend call failed; the local rollback already happened.
    #[error(transparent)]
    Backend(#[from] ApiError),
}

/// Applies task mutations optimistically and reconciles them against
/// the backend.
pub struct MutationCoordinator {
    store: Arc<Mutex<TaskStore>>,
    backend: Arc<dyn TaskBackend>,
    notifier: Arc<dyn Notifier>,
}

impl MutationCoordinator {
    /// Wires the coordinator to its store, backend, and notifier.
    #[must_use]
    pub fn new(
        store: Arc<Mutex<TaskStore>>,
        backend: Arc<dyn TaskBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { store, backend, notifier }
    }

    /// Creates a task.
    ///
    /// There is no id to key an optimistic entry by, so the store is
    /// only touched once the backend confirms and assigns one.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after notifying the user; the store
    /// is untouched in that case.
    pub async fn create(&self, request: CreateTask) -> Result<Task, MutationError> {
        let generation = self.store().generation();
        match self.backend.create_task(&request).await {
            Ok(task) => {
                debug!(task_id = %task.id, "create confirmed");
                let mut store = self.store();
                if store.generation() == generation {
                    store.upsert(task.clone());
                } else {
                    debug!(task_id = %task.id, "store reloaded mid-create; dropping insert");
                }
                Ok(task)
            }
            Err(err) => {
                warn!(title = %request.title, error = %err, "create failed");
                self.notifier
                    .notify(Notice::error(format!("Could not create task '{}': {err}", request.title)));
                Err(err.into())
            }
        }
    }

    /// Applies a partial update optimistically and confirms it.
    ///
    /// # Errors
    ///
    /// [`MutationError::UnknownTask`] if the id is not cached (no
    /// backend call is made). [`MutationError::Backend`] after the
    /// rollback and notification have already happened.
    pub async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<Task, MutationError> {
        let (snapshot, generation) = {
            let mut store = self.store();
            let Some(task) = store.get(task_id) else {
                return Err(MutationError::UnknownTask(task_id.to_string()));
            };
            let snapshot = task.clone();
            let mut updated = snapshot.clone();
            patch.apply(&mut updated);
            store.upsert(updated);
            (snapshot, store.generation())
        };
        debug!(task_id, "optimistic update applied");

        match self.backend.update_task(task_id, &patch).await {
            Ok(server_task) => {
                let mut store = self.store();
                if store.generation() == generation {
                    store.upsert(server_task.clone());
                } else {
                    debug!(task_id, "store reloaded mid-update; dropping reconciliation");
                }
                Ok(server_task)
            }
            Err(err) => {
                self.recover_update(task_id, snapshot, generation, &err);
                Err(err.into())
            }
        }
    }

    /// Removes a task optimistically and confirms the delete.
    ///
    /// # Errors
    ///
    /// [`MutationError::UnknownTask`] if the id is not cached.
    /// [`MutationError::Backend`] after the rollback (the task returns
    /// to its original position) and notification.
    pub async fn delete(&self, task_id: &str) -> Result<(), MutationError> {
        let (position, snapshot, generation) = {
            let mut store = self.store();
            let Some((position, task)) = store.remove(task_id) else {
                return Err(MutationError::UnknownTask(task_id.to_string()));
            };
            (position, task, store.generation())
        };
        debug!(task_id, "optimistic delete applied");

        match self.backend.delete_task(task_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.recover_delete(task_id, position, snapshot, generation, &err);
                Err(err.into())
            }
        }
    }

    fn recover_update(&self, task_id: &str, snapshot: Task, generation: u64, err: &ApiError) {
        let mut store = self.store();
        if store.generation() != generation {
            debug!(task_id, "store reloaded mid-update; dropping rollback");
            return;
        }
        if *err == ApiError::NotFound {
            // The server no longer knows this task: the cache has
            // diverged, so prune rather than restore.
            warn!(task_id, "task vanished server-side; pruning local entry");
            store.remove(task_id);
            self.notifier.notify(Notice::warning(format!(
                "'{}' no longer exists on the server; it was removed from the board",
                snapshot.title
            )));
            return;
        }
        warn!(task_id, error = %err, "update failed; rolling back");
        let title = snapshot.title.clone();
        store.upsert(snapshot);
        self.notifier
            .notify(Notice::error(format!("Could not save '{title}': {err}")));
    }

    fn recover_delete(
        &self,
        task_id: &str,
        position: usize,
        snapshot: Task,
        generation: u64,
        err: &ApiError,
    ) {
        let mut store = self.store();
        if store.generation() != generation {
            debug!(task_id, "store reloaded mid-delete; dropping rollback");
            return;
        }
        if *err == ApiError::NotFound {
            // Already gone server-side; the optimistic removal stands.
            warn!(task_id, "task already deleted server-side");
            self.notifier.notify(Notice::warning(format!(
                "'{}' was already deleted on the server",
                snapshot.title
            )));
            return;
        }
        warn!(task_id, error = %err, "delete failed; restoring task");
        let title = snapshot.title.clone();
        store.insert_at(position, snapshot);
        self.notifier
            .notify(Notice::error(format!("Could not delete '{title}': {err}")));
    }

    fn store(&self) -> MutexGuard<'_, TaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
