//! Live `TaskBackend` adapter over the project management REST API.
//!
//! Owns the wire shape: snake_case field names, a nested assignee on
//! reads but an id-only assignee on writes, and FastAPI-style `detail`
//! error bodies. The core never sees any of this.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BoardConfig;
use crate::ports::{ApiError, BackendFuture, CreateTask, TaskBackend, TaskPatch};
use crate::task::{Priority, Status, Task, UserRef};

/// Live HTTP client for one project's tasks.
pub struct HttpBackend {
    client: Client,
    api_url: String,
    project_id: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Builds the adapter from the loaded configuration.
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            project_id: config.project_id.clone(),
            token: config.api_token.clone(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/projects/{}/tasks/", self.api_url, self.project_id)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/api/projects/{}/tasks/{id}", self.api_url, self.project_id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response =
            request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from(response).await)
    }
}

/// Maps a non-success response onto the error taxonomy.
async fn error_from(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    match status {
        404 => ApiError::NotFound,
        401 | 403 => ApiError::PermissionDenied,
        _ => {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorDto>(&body)
                .map_or(body, |e| e.detail);
            ApiError::Rejected { status, message }
        }
    }
}

/// FastAPI-style error body.
#[derive(Deserialize)]
struct ErrorDto {
    detail: String,
}

/// A task as the backend serves it.
#[derive(Debug, Deserialize)]
struct TaskDto {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    status: Status,
    priority: Priority,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    assigned_to: Option<UserDto>,
    #[serde(default)]
    dependencies: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// The assignee as nested in a task read.
#[derive(Debug, Deserialize)]
struct UserDto {
    id: String,
    full_name: String,
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Task {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            status: dto.status,
            priority: dto.priority,
            phase: dto.phase,
            due_date: dto.due_date,
            assigned_to: dto
                .assigned_to
                .map(|u| UserRef { id: u.id, full_name: u.full_name }),
            dependencies: dto.dependencies,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Create request body. The assignee is referenced by id.
#[derive(Serialize)]
struct CreateTaskDto<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    status: Status,
    priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<&'a str>,
}

impl<'a> From<&'a CreateTask> for CreateTaskDto<'a> {
    fn from(request: &'a CreateTask) -> Self {
        Self {
            title: &request.title,
            description: request.description.as_deref(),
            status: request.status,
            priority: request.priority,
            phase: request.phase.as_deref(),
            due_date: request.due_date,
            assigned_to: request.assigned_to.as_deref(),
        }
    }
}

/// Update request body. Absent fields are left out entirely; explicit
/// `null` clears an optional field.
#[derive(Serialize)]
struct UpdateTaskDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<Option<&'a str>>,
}

impl<'a> From<&'a TaskPatch> for UpdateTaskDto<'a> {
    fn from(patch: &'a TaskPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            description: patch.description.as_ref().map(Option::as_deref),
            status: patch.status,
            priority: patch.priority,
            phase: patch.phase.as_ref().map(Option::as_deref),
            due_date: patch.due_date,
            assigned_to: patch.assigned_to.as_ref().map(Option::as_deref),
        }
    }
}

impl TaskBackend for HttpBackend {
    fn list_tasks(&self) -> BackendFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let url = self.tasks_url();
            debug!(%url, "GET tasks");
            let response = self.send(self.client.get(&url)).await?;
            let dtos: Vec<TaskDto> = response
                .json()
                .await
                .map_err(|e| ApiError::Transport(format!("invalid task list body: {e}")))?;
            Ok(dtos.into_iter().map(Task::from).collect())
        })
    }

    fn create_task(&self, request: &CreateTask) -> BackendFuture<'_, Task> {
        let request = request.clone();
        Box::pin(async move {
            let url = self.tasks_url();
            debug!(%url, title = %request.title, "POST task");
            let body = CreateTaskDto::from(&request);
            let response = self.send(self.client.post(&url).json(&body)).await?;
            let dto: TaskDto = response
                .json()
                .await
                .map_err(|e| ApiError::Transport(format!("invalid task body: {e}")))?;
            Ok(dto.into())
        })
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> BackendFuture<'_, Task> {
        let id = id.to_string();
        let patch = patch.clone();
        Box::pin(async move {
            let url = self.task_url(&id);
            debug!(%url, "PUT task");
            let body = UpdateTaskDto::from(&patch);
            let response = self.send(self.client.put(&url).json(&body)).await?;
            let dto: TaskDto = response
                .json()
                .await
                .map_err(|e| ApiError::Transport(format!("invalid task body: {e}")))?;
            Ok(dto.into())
        })
    }

    fn delete_task(&self, id: &str) -> BackendFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            let url = self.task_url(&id);
            debug!(%url, "DELETE task");
            self.send(self.client.delete(&url)).await?;
            Ok(())
        })
    }
}
