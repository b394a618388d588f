//! Builder API for registering a state machine hierarchy.
//!
//! States and machines are registered once, up front. Registration problems
//! (duplicate kinds, empty machines) are all collected and reported together
//! by [`MasterBuilder::build`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod master;

pub use error::{BuildError, RegistrationError};
pub use machine::StateMachineBuilder;
pub use master::MasterBuilder;
