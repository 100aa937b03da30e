//! Analytics route handler.

use super::error::ApiError;
use super::state::AppState;
use crate::analytics::{AnalyticsQuery, AnalyticsReport};
use crate::tracker::domain::{BoardId, SprintId};
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for the analytics rollup.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Board to analyse; defaults to the earliest-created board.
    pub board_id: Option<Uuid>,
    /// Sprint to total separately.
    pub sprint_id: Option<Uuid>,
    /// Restrict overview and priority figures to tasks created on or
    /// after this date.
    pub start_date: Option<NaiveDate>,
    /// Restrict overview and priority figures to tasks created on or
    /// before this date.
    pub end_date: Option<NaiveDate>,
}

/// `GET /analytics`
pub async fn analytics_report(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let query = AnalyticsQuery {
        board_id: params.board_id.map(BoardId::from_uuid),
        sprint_id: params.sprint_id.map(SprintId::from_uuid),
        start_date: params.start_date,
        end_date: params.end_date,
    };
    let report = state.analytics.report(query).await.map_err(|error| {
        ApiError::from_service(error.kind(), &error, "Failed to fetch analytics")
    })?;
    Ok(Json(report))
}
