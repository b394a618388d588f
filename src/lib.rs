//! Statewright: a hierarchical, frame-driven state machine runtime
//!
//! A [`MasterStateMachine`] owns several named [`StateMachine`]s and keeps
//! exactly one of them active. Each machine owns a fixed set of [`State`]s
//! and keeps at most one of them current. A frame driver ticks the master,
//! which forwards to the active machine, which forwards to its current state.
//!
//! # Core Concepts
//!
//! - **Kind**: an enum variant identifying a state or a machine
//! - **State**: lifecycle hooks (enter, exit, tick, fixed tick, late tick)
//! - **Transitions**: requested by kind, validated, then exit-before-enter
//! - **Machine switches**: exit the active machine, activate another and
//!   enter one of its states in a single request
//!
//! # Example
//!
//! ```rust
//! use statewright::prelude::*;
//! use statewright::kind_enum;
//!
//! kind_enum! {
//!     pub enum Mode { Menu, Gameplay }
//! }
//!
//! kind_enum! {
//!     pub enum Screen { Title, Playing }
//! }
//!
//! struct Game;
//!
//! impl Hierarchy for Game {
//!     type Machine = Mode;
//!     type State = Screen;
//!     type Payload = StateData;
//! }
//!
//! struct Title;
//!
//! impl State<Game> for Title {
//!     fn kind(&self) -> Screen {
//!         Screen::Title
//!     }
//!
//!     fn enter_state(
//!         &mut self,
//!         _machine: &mut StateMachineHandle<'_, Game>,
//!         _args: Option<StateData>,
//!     ) -> Result<(), PayloadError> {
//!         Ok(())
//!     }
//!
//!     fn tick(&mut self, machine: &mut StateMachineHandle<'_, Game>) {
//!         let _ = machine.change_state_machine(Mode::Gameplay, Screen::Playing, None);
//!     }
//! }
//!
//! struct Playing;
//!
//! impl State<Game> for Playing {
//!     fn kind(&self) -> Screen {
//!         Screen::Playing
//!     }
//!
//!     fn enter_state(
//!         &mut self,
//!         _machine: &mut StateMachineHandle<'_, Game>,
//!         _args: Option<StateData>,
//!     ) -> Result<(), PayloadError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut master = MasterBuilder::<Game>::new()
//!     .machine(StateMachineBuilder::new(Mode::Menu).state(Title))
//!     .machine(StateMachineBuilder::new(Mode::Gameplay).state(Playing))
//!     .build()
//!     .unwrap();
//!
//! master.change_state_machine(Mode::Menu, Screen::Title, None).unwrap();
//! master.tick().unwrap();
//!
//! assert_eq!(master.active_kind(), Some(Mode::Gameplay));
//! ```

pub mod builder;
pub mod core;
pub mod driver;
pub mod payload;
pub mod runtime;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, MasterBuilder, StateMachineBuilder};
pub use crate::core::{Hierarchy, Kind, State};
pub use driver::{FrameDriver, FrameReport};
pub use payload::{PayloadError, StateData};
pub use runtime::{MasterStateMachine, StateMachine, StateMachineHandle, TransitionError};
pub use snapshot::Snapshot;

/// Everything needed to declare states and drive a hierarchy.
pub mod prelude {
    pub use crate::builder::{MasterBuilder, StateMachineBuilder};
    pub use crate::core::{Hierarchy, Kind, State};
    pub use crate::driver::FrameDriver;
    pub use crate::payload::{PayloadError, StateData};
    pub use crate::runtime::{MasterStateMachine, StateMachineHandle, TransitionError};
}
