//! Client-side reconciliation layer.
//!
//! Holds an in-memory view of tasks and activities, applies operations
//! optimistically, and degrades to locally synthesized state when the
//! server is unreachable.

mod dashboard;
mod placeholder;
mod policy;
mod ports;

pub use dashboard::{Dashboard, DeleteDecision};
pub use placeholder::{placeholder_activities, placeholder_tasks};
pub use policy::{DashboardOp, ReconcilePolicy};
pub use ports::{BackendClient, ClientError, ClientResult};
