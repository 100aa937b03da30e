//! Unit tests for the tracker module.
//!
//! Organised by layer: domain invariants first, then each orchestration
//! service exercised over the in-memory store.

mod board_service_tests;
mod domain_tests;
mod task_service_tests;
