//! The transition runtime.
//!
//! A [`MasterStateMachine`] owns every [`StateMachine`], which owns its
//! states. Ticks flow down the active chain (master, active machine, current
//! state); transition requests flow up through a [`StateMachineHandle`].
//!
//! # Re-entrancy
//!
//! Hooks may request transitions. Such a request is validated and applied to
//! the bookkeeping immediately, and its result is returned to the hook. The
//! exit and enter hooks it triggers are delivered once the running hook
//! returns, in request order, so no two hooks ever run at the same time and
//! every exit precedes the matching enter.

mod error;
mod handle;
mod machine;
mod master;

pub use error::TransitionError;
pub use handle::StateMachineHandle;
pub use machine::StateMachine;
pub use master::MasterStateMachine;
