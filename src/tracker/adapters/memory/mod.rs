//! In-memory adapter for the tracker ports.

mod store;

pub use store::InMemoryStore;
