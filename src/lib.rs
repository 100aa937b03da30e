//! TeamFlow: a team task-tracking backend.
//!
//! Boards hold tasks; every task mutation writes an immutable activity
//! audit record as part of the same logical operation. Read-side
//! analytics, a summarization service with a deterministic fallback, and
//! an optimistic client reconciliation layer sit on top.
//!
//! # Architecture
//!
//! The tracker core follows hexagonal architecture:
//!
//! - **Domain**: validated business types with no infrastructure
//!   dependencies
//! - **Ports**: trait contracts for persistence and remote calls
//! - **Adapters**: in-memory and `PostgreSQL` implementations
//!
//! # Modules
//!
//! - [`tracker`]: boards, tasks, and the activity log
//! - [`analytics`]: read-side rollups over the tracker stores
//! - [`summarize`]: remote summarization with a heuristic fallback
//! - [`client`]: client-side optimistic state reconciliation
//! - [`api`]: HTTP routing and the error envelope
//! - [`config`]: environment-derived server settings

pub mod analytics;
pub mod api;
pub mod client;
pub mod config;
pub mod summarize;
pub mod tracker;
