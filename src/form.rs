//! Task form draft state and validation.
//!
//! The form owns a local draft of the editable fields, seeded from an
//! existing task (edit) or from defaults with the column the add action
//! came from (create). Only the title is constrained here; everything
//! else is the backend's concern.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ports::{CreateTask, TaskPatch};
use crate::task::{Priority, Status, Task};

/// Longest accepted title, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Local validation failures. These never leave the form: no request is
/// built and nothing touches the store or the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("title is required")]
    TitleRequired,
    /// The title exceeds [`TITLE_MAX_LEN`] characters.
    #[error("title is longer than {TITLE_MAX_LEN} characters")]
    TitleTooLong,
}

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Creating; the status defaults to the column the add action was
    /// invoked from.
    Create,
    /// Editing the task with this id.
    Edit(String),
}

/// What a valid submit produces.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    /// A create request (the backend assigns the id).
    Create(CreateTask),
    /// A changed-fields-only update for one task.
    Update {
        /// The edited task's id.
        task_id: String,
        /// The fields that differ from the seeded task.
        patch: TaskPatch,
    },
}

/// Draft state for the task create/edit form.
///
/// Empty strings in `description` and `phase` mean "unset"; a blank
/// assignee means unassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    /// Title draft.
    pub title: String,
    /// Description draft ("" = none).
    pub description: String,
    /// Status selector.
    pub status: Status,
    /// Priority selector.
    pub priority: Priority,
    /// Phase draft ("" = none).
    pub phase: String,
    /// Due date selector.
    pub due_date: Option<NaiveDate>,
    /// Assignee user id (`None` = unassigned).
    pub assigned_to: Option<String>,
    mode: FormMode,
    baseline: Option<Task>,
    error: Option<String>,
}

impl TaskForm {
    /// A create draft for the given column. Priority defaults to
    /// medium.
    #[must_use]
    pub fn create(default_status: Status) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: default_status,
            priority: Priority::Medium,
            phase: String::new(),
            due_date: None,
            assigned_to: None,
            mode: FormMode::Create,
            baseline: None,
            error: None,
        }
    }

    /// An edit draft seeded from an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            phase: task.phase.clone().unwrap_or_default(),
            due_date: task.due_date,
            assigned_to: task.assigned_to.as_ref().map(|u| u.id.clone()),
            mode: FormMode::Edit(task.id.clone()),
            baseline: Some(task.clone()),
            error: None,
        }
    }

    /// The form's mode.
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Checks the draft without building a request.
    ///
    /// # Errors
    ///
    /// Returns the validation failure blocking submission, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(ValidationError::TitleTooLong);
        }
        Ok(())
    }

    /// Builds the request a submit would send.
    ///
    /// In edit mode the patch carries only the fields that differ from
    /// the seeded task; an unchanged form yields an empty patch.
    ///
    /// # Errors
    ///
    /// Returns the validation failure blocking submission, if any.
    pub fn submission(&self) -> Result<FormSubmission, ValidationError> {
        self.validate()?;
        let title = self.title.trim().to_string();
        let description = non_empty(&self.description);
        let phase = non_empty(&self.phase);

        match &self.mode {
            FormMode::Create => Ok(FormSubmission::Create(CreateTask {
                title,
                description,
                status: self.status,
                priority: self.priority,
                phase,
                due_date: self.due_date,
                assigned_to: self.assigned_to.clone(),
            })),
            FormMode::Edit(task_id) => {
                let baseline = self.baseline.as_ref();
                let mut patch = TaskPatch::default();
                if baseline.map(|t| t.title.as_str()) != Some(title.as_str()) {
                    patch.title = Some(title);
                }
                if baseline.and_then(|t| t.description.clone()) != description {
                    patch.description = Some(description);
                }
                if baseline.map(|t| t.status) != Some(self.status) {
                    patch.status = Some(self.status);
                }
                if baseline.map(|t| t.priority) != Some(self.priority) {
                    patch.priority = Some(self.priority);
                }
                if baseline.and_then(|t| t.phase.clone()) != phase {
                    patch.phase = Some(phase);
                }
                if baseline.and_then(|t| t.due_date) != self.due_date {
                    patch.due_date = Some(self.due_date);
                }
                let baseline_assignee = baseline.and_then(|t| t.assigned_to.as_ref().map(|u| u.id.clone()));
                if baseline_assignee != self.assigned_to {
                    patch.assigned_to = Some(self.assigned_to.clone());
                }
                Ok(FormSubmission::Update { task_id: task_id.clone(), patch })
            }
        }
    }

    /// Records a failed submit. The draft is kept so the user can retry;
    /// the message is surfaced inline.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// The inline error from the last failed submit, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clears the inline error (typically on the next edit keystroke).
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
