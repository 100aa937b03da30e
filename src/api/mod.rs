//! HTTP boundary: routing, request payloads, and the error envelope.
//!
//! All error responses use the `{"error": string}` envelope with status
//! 400 for validation failures, 404 for missing entities, and 500 for
//! store or downstream failures.

mod activities;
mod analytics;
mod boards;
mod error;
mod state;
mod summarize;
mod tasks;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;

/// Builds the application router over the given state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/activities",
            get(activities::list_activities).post(activities::record_activity),
        )
        .route(
            "/boards",
            get(boards::list_boards).post(boards::create_board),
        )
        .route("/analytics", get(analytics::analytics_report))
        .route("/summarize", post(summarize::summarize_text))
        .with_state(state)
}
