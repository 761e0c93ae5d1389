//! In-memory authoritative cache of a board's tasks.
//!
//! The store is the single mutable resource on the client. Reads are
//! cheap slices; every mutation goes through the coordinator's commit
//! path (front-ends never write here directly).

use crate::task::Task;

/// Insertion-ordered task cache keyed by task id.
///
/// `all()` preserves load/insert order; column ordering is derived
/// elsewhere. A generation counter tracks full reloads so that late
/// reconciliations from a previous lifetime can be detected and dropped.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    generation: u64,
}

impl TaskStore {
    /// Creates an empty store at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full task set (used on initial fetch and refresh).
    ///
    /// Bumps the store generation. Duplicate ids in the input keep the
    /// first occurrence; the store never holds two entries with one id.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks.clear();
        for task in tasks {
            if self.get(&task.id).is_some() {
                tracing::warn!(task_id = %task.id, "duplicate task id in load; keeping first");
                continue;
            }
            self.tasks.push(task);
        }
        self.generation += 1;
    }

    /// Inserts a task, or replaces the existing entry with the same id
    /// in place (keeping its position).
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    /// Removes a task by id, returning its position and value.
    ///
    /// Removing an absent id is a no-op and returns `None`.
    pub fn remove(&mut self, id: &str) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some((index, self.tasks.remove(index)))
    }

    /// Re-inserts a task at a prior position (clamped to the current
    /// length). Used to restore the exact pre-image after a rollback.
    pub fn insert_at(&mut self, index: usize, task: Task) {
        if self.get(&task.id).is_some() {
            self.upsert(task);
            return;
        }
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Reload generation. Bumped by every `load`.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
