//! Scheduling store: repository abstraction plus the in-memory implementation.

pub mod repository;
pub mod store;

pub use repository::{SchedulingRepository, UpdateOutcome};
pub use store::InMemorySchedulingStore;
