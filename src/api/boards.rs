//! Board route handlers.

use super::error::ApiError;
use super::state::AppState;
use crate::tracker::domain::UserId;
use crate::tracker::services::BoardView;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

/// Request body for creating a board.
#[derive(Debug, Deserialize)]
pub struct CreateBoardBody {
    /// Board name; required and non-blank.
    pub name: Option<String>,
    /// Optional description; defaults to empty.
    pub description: Option<String>,
    /// Creating user; defaults to the configured default actor.
    pub created_by: Option<Uuid>,
}

/// `GET /boards`
pub async fn list_boards(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardView>>, ApiError> {
    let views = state
        .boards
        .list()
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to fetch boards"))?;
    Ok(Json(views))
}

/// `POST /boards`
pub async fn create_board(
    State(state): State<AppState>,
    Json(body): Json<CreateBoardBody>,
) -> Result<(StatusCode, Json<BoardView>), ApiError> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Board name is required"))?;

    let created_by = body
        .created_by
        .map(UserId::from_uuid)
        .or(state.default_actor)
        .ok_or_else(|| ApiError::bad_request("created_by is required"))?;

    let view = state
        .boards
        .create(name, body.description.unwrap_or_default(), created_by)
        .await
        .map_err(|error| ApiError::from_service(error.kind(), &error, "Failed to create board"))?;
    Ok((StatusCode::CREATED, Json(view)))
}
