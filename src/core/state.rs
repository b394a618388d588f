//! The contract every concrete state implements.

use super::kind::Hierarchy;
use crate::payload::PayloadError;
use crate::runtime::StateMachineHandle;

/// A unit of behavior that is active exclusively within one state machine.
///
/// Each hook receives a handle to the owning machine. The handle is the only
/// way back up the tree: use it to request a transition inside the machine or
/// a switch to another machine. Requests made from inside a hook are applied
/// to the machine's bookkeeping at once; the hooks they trigger run right
/// after the current hook returns, in request order.
///
/// # Example
///
/// ```rust
/// use statewright::core::{Hierarchy, State};
/// use statewright::payload::{self, PayloadError, StateData};
/// use statewright::runtime::StateMachineHandle;
/// use statewright::kind_enum;
///
/// kind_enum! {
///     pub enum Mode { Gameplay }
/// }
///
/// kind_enum! {
///     pub enum Screen { Playing, GameOver }
/// }
///
/// struct Game;
///
/// impl Hierarchy for Game {
///     type Machine = Mode;
///     type State = Screen;
///     type Payload = StateData;
/// }
///
/// struct Playing {
///     lives: u32,
/// }
///
/// impl State<Game> for Playing {
///     fn kind(&self) -> Screen {
///         Screen::Playing
///     }
///
///     fn enter_state(
///         &mut self,
///         _machine: &mut StateMachineHandle<'_, Game>,
///         args: Option<StateData>,
///     ) -> Result<(), PayloadError> {
///         self.lives = payload::downcast_opt::<u32>(args)?.unwrap_or(3);
///         Ok(())
///     }
///
///     fn tick(&mut self, machine: &mut StateMachineHandle<'_, Game>) {
///         if self.lives == 0 {
///             let _ = machine.change_state(Screen::GameOver, None);
///         }
///     }
/// }
/// ```
pub trait State<H: Hierarchy> {
    /// The kind this state is registered under. Must never change.
    fn kind(&self) -> H::State;

    /// Called when the state becomes current.
    ///
    /// `args` is the payload supplied by whoever requested the transition,
    /// passed through untouched. Return an error when it cannot be used.
    fn enter_state(
        &mut self,
        machine: &mut StateMachineHandle<'_, H>,
        args: Option<H::Payload>,
    ) -> Result<(), PayloadError>;

    /// Called when the state stops being current, or its machine is deactivated.
    fn exit_state(&mut self, _machine: &mut StateMachineHandle<'_, H>) {}

    /// Regular per-frame update.
    fn tick(&mut self, _machine: &mut StateMachineHandle<'_, H>) {}

    /// Physics-rate update.
    fn fixed_tick(&mut self, _machine: &mut StateMachineHandle<'_, H>) {}

    /// Update run after every regular tick of the frame.
    fn late_tick(&mut self, _machine: &mut StateMachineHandle<'_, H>) {}
}
