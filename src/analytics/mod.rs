//! Read-side analytics rollups derived from the tracker stores.
//!
//! The aggregator never writes; it scans tasks and activities through the
//! repository ports so the in-memory and PostgreSQL adapters share one
//! code path.

mod report;
mod service;

pub use report::{
    completion_rate, AnalyticsReport, Overview, PriorityBucket, SprintTotals, TrendPoint,
    UserActivitySummary,
};
pub use service::{AnalyticsError, AnalyticsQuery, AnalyticsResult, AnalyticsService};
