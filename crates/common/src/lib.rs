//! Pieces shared by every crate in the workspace: tracing setup and
//! small wire types that are not part of the scheduling model.

pub mod types;
pub mod utils;
