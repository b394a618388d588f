//! Borrowed access to one machine of a master.

use crate::core::Hierarchy;
use crate::runtime::error::TransitionError;
use crate::runtime::machine::{Hook, StateMachine};
use crate::runtime::master::MasterStateMachine;

/// A non-owning reference to one state machine inside its master.
///
/// States receive a handle in every hook; external callers get one from
/// [`MasterStateMachine::machine_mut`]. It is the back-reference from a state
/// to its machine and from a machine to its master: it can request
/// transitions but never outlives the borrow it was created from.
pub struct StateMachineHandle<'a, H: Hierarchy> {
    master: &'a mut MasterStateMachine<H>,
    machine: usize,
}

impl<'a, H: Hierarchy> StateMachineHandle<'a, H> {
    pub(crate) fn new(master: &'a mut MasterStateMachine<H>, machine: usize) -> Self {
        Self { master, machine }
    }

    /// The machine this handle points at.
    pub fn machine(&self) -> &StateMachine<H> {
        self.master.machine_at(self.machine)
    }

    pub fn kind(&self) -> H::Machine {
        self.machine().kind()
    }

    pub fn current_kind(&self) -> Option<H::State> {
        self.machine().current_kind()
    }

    pub fn previous_kind(&self) -> Option<H::State> {
        self.machine().previous_kind()
    }

    /// Kind of the master's active machine, which need not be this one.
    pub fn active_machine(&self) -> Option<H::Machine> {
        self.master.active_kind()
    }

    /// Change the current state of this machine to the one of kind `state`.
    ///
    /// Rejected without any change when `state` is already current or is not
    /// registered here. On success the old state is exited before the new
    /// state is entered with `args`.
    ///
    /// Called from inside a hook, the exit and enter hooks run only after the
    /// calling hook returns, so this returns `Ok` before the new state has
    /// seen `args`. A payload the new state rejects is then reported by the
    /// outermost call that started the dispatch (`tick`, `change_state` or
    /// `change_state_machine` on the master or a handle).
    pub fn change_state(
        &mut self,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        self.master.change_state(self.machine, state, args)
    }

    /// Ask the master to activate another machine and enter `state` in it.
    ///
    /// Payload failures from inside a hook surface the same way as for
    /// [`change_state`](Self::change_state).
    pub fn change_state_machine(
        &mut self,
        machine: H::Machine,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        self.master.change_state_machine(machine, state, args)
    }

    /// Exit the current state, keeping it remembered. No-op without one.
    pub fn exit(&mut self) -> Result<(), TransitionError> {
        self.master.exit(self.machine)
    }

    pub fn tick(&mut self) -> Result<(), TransitionError> {
        self.master.tick_machine(self.machine, Hook::Tick)
    }

    pub fn fixed_tick(&mut self) -> Result<(), TransitionError> {
        self.master.tick_machine(self.machine, Hook::FixedTick)
    }

    pub fn late_tick(&mut self) -> Result<(), TransitionError> {
        self.master.tick_machine(self.machine, Hook::LateTick)
    }
}
