//! Task route handlers.

use super::error::ApiError;
use super::state::AppState;
use crate::tracker::domain::{
    BoardId, StoryPoints, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle, UserId,
};
use crate::tracker::services::{CreateTaskRequest, ErrorKind, TaskView};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use uuid::Uuid;

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    /// Board to list; defaults to the earliest-created board.
    pub board_id: Option<Uuid>,
    /// Optional status filter.
    pub status: Option<String>,
}

/// Request body for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    /// Task title; required and non-blank.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status; defaults to `todo`.
    pub status: Option<String>,
    /// Initial priority; defaults to `medium`.
    pub priority: Option<String>,
    /// Story point estimate; defaults to 1.
    pub story_points: Option<i32>,
    /// Optional assignee.
    pub assignee_id: Option<Uuid>,
    /// Owning board; defaults to the earliest-created board.
    pub board_id: Option<Uuid>,
    /// Creating user; defaults to the configured default actor.
    pub created_by: Option<Uuid>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

/// Request body for a partial task update.
///
/// The outer `Option` distinguishes an absent field from one explicitly
/// supplied as null: absent fields are kept, null clears a nullable field.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    pub title: Option<String>,
    /// New description; null clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<String>,
    /// New priority.
    pub priority: Option<String>,
    /// New story point estimate.
    pub story_points: Option<i32>,
    /// New assignee; null unassigns.
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<Uuid>>,
    /// New due date; null clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `GET /tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListTasksParams>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let status = parse_optional_status(params.status.as_deref())?;
    let board_id = match params.board_id {
        Some(raw) => Some(BoardId::from_uuid(raw)),
        None => state.default_board().await.map_err(|error| {
            ApiError::from_service(ErrorKind::Operation, &error, "Failed to fetch tasks")
        })?,
    };
    let Some(board_id) = board_id else {
        return Ok(Json(Vec::new()));
    };

    let views = state
        .tasks
        .list_by_board(board_id, status)
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to fetch tasks"))?;
    Ok(Json(views))
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ApiError::bad_request("Title is required"))?;

    let board_id = match body.board_id {
        Some(raw) => BoardId::from_uuid(raw),
        None => state
            .default_board()
            .await
            .map_err(|error| {
                ApiError::from_service(ErrorKind::Operation, &error, "Failed to create task")
            })?
            .ok_or_else(|| ApiError::not_found("Board not found"))?,
    };

    let created_by = body
        .created_by
        .map(UserId::from_uuid)
        .or(state.default_actor)
        .ok_or_else(|| ApiError::bad_request("created_by is required"))?;

    let mut request = CreateTaskRequest::new(board_id, title, created_by);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(raw) = body.status.as_deref() {
        request = request.with_status(parse_status(raw)?);
    }
    if let Some(raw) = body.priority.as_deref() {
        request = request.with_priority(parse_priority(raw)?);
    }
    if let Some(story_points) = body.story_points {
        request = request.with_story_points(story_points);
    }
    if let Some(assignee_id) = body.assignee_id {
        request = request.with_assignee(UserId::from_uuid(assignee_id));
    }
    if let Some(due_date) = body.due_date {
        request = request.with_due_date(due_date);
    }

    let view = state
        .tasks
        .create(request)
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to create task"))?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskView>, ApiError> {
    let view = state
        .tasks
        .get(TaskId::from_uuid(id))
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to fetch task"))?;
    Ok(Json(view))
}

/// `PUT /tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<TaskView>, ApiError> {
    let patch = body_to_patch(body)?;
    let view = state
        .tasks
        .update(TaskId::from_uuid(id), patch, None)
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to update task"))?;
    Ok(Json(view))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .tasks
        .delete(TaskId::from_uuid(id), None)
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to delete task"))?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

fn body_to_patch(body: UpdateTaskBody) -> Result<TaskPatch, ApiError> {
    let mut patch = TaskPatch::new();
    if let Some(raw) = body.title {
        let title =
            TaskTitle::new(raw).map_err(|error| ApiError::bad_request(error.to_string()))?;
        patch = patch.with_title(title);
    }
    if let Some(description) = body.description {
        patch = patch.with_description(description);
    }
    if let Some(raw) = body.status.as_deref() {
        patch = patch.with_status(parse_status(raw)?);
    }
    if let Some(raw) = body.priority.as_deref() {
        patch = patch.with_priority(parse_priority(raw)?);
    }
    if let Some(points) = body.story_points {
        let points =
            StoryPoints::new(points).map_err(|error| ApiError::bad_request(error.to_string()))?;
        patch = patch.with_story_points(points);
    }
    if let Some(assignee_id) = body.assignee_id {
        patch = patch.with_assignee(assignee_id.map(UserId::from_uuid));
    }
    if let Some(due_date) = body.due_date {
        patch = patch.with_due_date(due_date);
    }
    Ok(patch)
}

fn parse_status(raw: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::try_from(raw).map_err(|error| ApiError::bad_request(error.to_string()))
}

fn parse_optional_status(raw: Option<&str>) -> Result<Option<TaskStatus>, ApiError> {
    raw.map(parse_status).transpose()
}

fn parse_priority(raw: &str) -> Result<TaskPriority, ApiError> {
    TaskPriority::try_from(raw).map_err(|error| ApiError::bad_request(error.to_string()))
}
