//! Summarization route handler.

use super::error::ApiError;
use super::state::AppState;
use crate::summarize::{Summary, SummaryKind};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

/// Request body for summarization.
#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    /// Text to summarize; required and non-blank.
    pub text: Option<String>,
    /// What kind of text this is; defaults to `task`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// `POST /summarize`
pub async fn summarize_text(
    State(state): State<AppState>,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<Summary>, ApiError> {
    let text = body.text.unwrap_or_default();
    let kind = SummaryKind::parse(body.kind.as_deref());
    let summary = state.summarize.summarize(&text, kind).await.map_err(|error| {
        ApiError::from_service(error.kind(), &error, "Failed to generate summary")
    })?;
    Ok(Json(summary))
}
