//! Access gate: every store operation is checked against the caller's
//! capabilities before the store is touched.

pub mod capability;
pub mod gate;

pub use capability::{Capability, CapabilitySet, Operation};
pub use gate::AccessGate;
