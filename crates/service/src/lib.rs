//! Scheduling core: the in-memory store, the capability gate in front of it,
//! and bearer token verification that produces the caller's capabilities.
//! - Transport agnostic; the axum adapter lives in the `server` crate.
//! - The store is injected into the gate explicitly, there is no global state.

pub mod errors;
pub mod access;
pub mod auth;
pub mod scheduling;

pub use access::{AccessGate, Capability, CapabilitySet, Operation};
pub use scheduling::{InMemorySchedulingStore, SchedulingRepository, UpdateOutcome};
