//! Core vocabulary of a state machine hierarchy.
//!
//! This module defines what the runtime is generic over:
//! - `Kind`: discriminators for states and machines
//! - `Hierarchy`: the marker bundling a hierarchy's kinds and payload
//! - `State`: the lifecycle contract of a concrete state

mod kind;
mod state;

pub use kind::{Hierarchy, Kind};
pub use state::State;
