//! Activity route handlers.

use super::error::ApiError;
use super::state::AppState;
use crate::tracker::domain::UserId;
use crate::tracker::ports::ActivityFilter;
use crate::tracker::services::{ActivityView, RecordActivityRequest};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Rows returned when no limit is requested.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for listing activities.
#[derive(Debug, Deserialize)]
pub struct ListActivitiesParams {
    /// Optional entity type filter.
    pub entity_type: Option<String>,
    /// Optional entity filter.
    pub entity_id: Option<Uuid>,
    /// Page size; defaults to 50.
    pub limit: Option<i64>,
    /// Rows to skip; defaults to 0.
    pub offset: Option<i64>,
}

/// Request body for manually recording an activity.
#[derive(Debug, Deserialize)]
pub struct RecordActivityBody {
    /// Action name; required.
    pub action: Option<String>,
    /// Entity type; required.
    pub entity_type: Option<String>,
    /// Entity identifier; required.
    pub entity_id: Option<Uuid>,
    /// Acting user; defaults to the configured default actor.
    pub user_id: Option<Uuid>,
    /// Free-form details payload.
    pub details: Option<Value>,
}

/// `GET /activities`
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<ListActivitiesParams>,
) -> Result<Json<Vec<ActivityView>>, ApiError> {
    let mut filter = ActivityFilter::new()
        .with_limit(params.limit.unwrap_or(DEFAULT_LIMIT))
        .with_offset(params.offset.unwrap_or(0));
    if let Some(entity_type) = params.entity_type {
        filter = filter.with_entity_type(entity_type);
    }
    if let Some(entity_id) = params.entity_id {
        filter = filter.with_entity_id(entity_id);
    }

    let views = state.activities.list(&filter).await.map_err(|error| {
        ApiError::from_service(error.kind(), &error, "Failed to fetch activities")
    })?;
    Ok(Json(views))
}

/// `POST /activities`
pub async fn record_activity(
    State(state): State<AppState>,
    Json(body): Json<RecordActivityBody>,
) -> Result<(StatusCode, Json<ActivityView>), ApiError> {
    let (Some(action), Some(entity_type), Some(entity_id)) =
        (body.action, body.entity_type, body.entity_id)
    else {
        return Err(ApiError::bad_request(
            "Action, entity_type, and entity_id are required",
        ));
    };

    let request = RecordActivityRequest {
        action,
        entity_type,
        entity_id,
        user_id: body.user_id.map(UserId::from_uuid),
        details: body.details,
    };
    let view = state.activities.record(request).await.map_err(|error| {
        ApiError::from_service(error.kind(), &error, "Failed to create activity")
    })?;
    Ok((StatusCode::CREATED, Json(view)))
}
