//! Named reconciliation policies for dashboard operations.
//!
//! The policies deliberately differ per operation. A failed move keeps the
//! optimistic edit and stays quiet; a failed add or update flags the error
//! but synthesizes local state so the view stays usable; delete never
//! touches local state until the server confirms. Unifying them would
//! change intended behavior, not simplify it.

/// A dashboard operation with a reconciliation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardOp {
    /// Initial fetch of tasks and activities.
    Load,
    /// Creating a task.
    Add,
    /// Dragging a task to a new status column.
    Move,
    /// Editing task fields.
    Update,
    /// Deleting a task.
    Delete,
}

/// How a failed operation reconciles local state with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Flag a user-visible error and synthesize local state so the view
    /// stays populated.
    FlagAndSynthesize,
    /// Keep the optimistic local edit, log the failure, surface nothing.
    KeepLocalSilently,
    /// Apply nothing locally until the server confirms; report the failure
    /// to the caller.
    StrictConfirm,
}

impl DashboardOp {
    /// Returns the reconciliation policy for this operation.
    #[must_use]
    pub const fn policy(self) -> ReconcilePolicy {
        match self {
            Self::Load | Self::Add | Self::Update => ReconcilePolicy::FlagAndSynthesize,
            Self::Move => ReconcilePolicy::KeepLocalSilently,
            Self::Delete => ReconcilePolicy::StrictConfirm,
        }
    }
}
