//! The master: owner of every state machine and of hook dispatch.

use crate::core::{Hierarchy, Kind};
use crate::runtime::error::TransitionError;
use crate::runtime::handle::StateMachineHandle;
use crate::runtime::machine::{Hook, Planned, StateMachine};
use crate::snapshot::{MachineSnapshot, Snapshot};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, error, trace, warn};

/// A hook addressed to one state of one machine.
struct HookCall<P> {
    machine: usize,
    slot: usize,
    hook: Hook<P>,
}

/// Owns a fixed set of uniquely-kinded state machines, at most one active.
///
/// Frame ticks are forwarded to the active machine only. Transitions update
/// bookkeeping as soon as they are requested; the hooks they trigger go
/// through a single FIFO queue so that exactly one hook runs at a time. When
/// a request comes from outside any hook the queue is drained before the
/// request returns.
pub struct MasterStateMachine<H: Hierarchy> {
    machines: Vec<StateMachine<H>>,
    index: HashMap<H::Machine, usize>,
    active: Option<usize>,
    pending: VecDeque<HookCall<H::Payload>>,
    dispatching: bool,
}

impl<H: Hierarchy> MasterStateMachine<H> {
    /// Registration is validated by the builder; kinds here are unique.
    pub(crate) fn new(machines: Vec<StateMachine<H>>) -> Self {
        let mut index = HashMap::with_capacity(machines.len());
        for (slot, machine) in machines.iter().enumerate() {
            index.entry(machine.kind()).or_insert(slot);
        }

        Self {
            machines,
            index,
            active: None,
            pending: VecDeque::new(),
            dispatching: false,
        }
    }

    /// Kind of the active machine, `None` until the first switch.
    pub fn active_kind(&self) -> Option<H::Machine> {
        self.active.map(|slot| self.machines[slot].kind())
    }

    /// The active machine.
    pub fn active(&self) -> Option<&StateMachine<H>> {
        self.active.map(|slot| &self.machines[slot])
    }

    /// Look up a machine for inspection.
    pub fn machine(&self, kind: H::Machine) -> Option<&StateMachine<H>> {
        self.index.get(&kind).map(|&slot| &self.machines[slot])
    }

    /// Handle for driving one machine directly, active or not.
    pub fn machine_mut(&mut self, kind: H::Machine) -> Option<StateMachineHandle<'_, H>> {
        let slot = *self.index.get(&kind)?;
        Some(StateMachineHandle::new(self, slot))
    }

    /// Handle for the active machine.
    pub fn active_mut(&mut self) -> Option<StateMachineHandle<'_, H>> {
        let slot = self.active?;
        Some(StateMachineHandle::new(self, slot))
    }

    /// Registered machines in registration order.
    pub fn machines(&self) -> impl Iterator<Item = &StateMachine<H>> + '_ {
        self.machines.iter()
    }

    /// Run the regular update of the active machine's current state.
    pub fn tick(&mut self) -> Result<(), TransitionError> {
        self.tick_active(Hook::Tick)
    }

    /// Run the physics-rate update of the active machine's current state.
    pub fn fixed_tick(&mut self) -> Result<(), TransitionError> {
        self.tick_active(Hook::FixedTick)
    }

    /// Run the late update of the active machine's current state.
    pub fn late_tick(&mut self) -> Result<(), TransitionError> {
        self.tick_active(Hook::LateTick)
    }

    /// Make `machine` the active machine and drive it to `state`.
    ///
    /// An unknown machine kind is rejected before anything changes. Otherwise
    /// the previously active machine is exited (its memory of current and
    /// previous state is kept), the target becomes active, and the result of
    /// changing its state is returned.
    pub fn change_state_machine(
        &mut self,
        machine: H::Machine,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        let requested = self.switch_to(machine, state, args);
        let delivered = self.flush();
        requested.and(delivered)
    }

    /// Capture the bookkeeping of every machine.
    pub fn snapshot(&self) -> Snapshot<H::Machine, H::State> {
        let machines = self
            .machines
            .iter()
            .map(|m| MachineSnapshot {
                kind: m.kind(),
                current: m.current_kind(),
                previous: m.previous_kind(),
                suspended: m.is_suspended(),
            })
            .collect();
        Snapshot::new(self.active_kind(), machines)
    }

    pub(crate) fn machine_at(&self, slot: usize) -> &StateMachine<H> {
        &self.machines[slot]
    }

    fn tick_active(&mut self, hook: Hook<H::Payload>) -> Result<(), TransitionError> {
        let Some(machine) = self.active else {
            return Ok(());
        };
        self.tick_machine(machine, hook)
    }

    pub(crate) fn tick_machine(
        &mut self,
        machine: usize,
        hook: Hook<H::Payload>,
    ) -> Result<(), TransitionError> {
        let Some(slot) = self.machines[machine].running_slot() else {
            return Ok(());
        };
        self.pending.push_back(HookCall {
            machine,
            slot,
            hook,
        });
        self.flush()
    }

    pub(crate) fn change_state(
        &mut self,
        machine: usize,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        let requested = self.transition(machine, state, args);
        let delivered = self.flush();
        requested.and(delivered)
    }

    pub(crate) fn exit(&mut self, machine: usize) -> Result<(), TransitionError> {
        self.suspend(machine);
        self.flush()
    }

    fn switch_to(
        &mut self,
        machine: H::Machine,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        let Some(&target) = self.index.get(&machine) else {
            warn!(machine = machine.name(), "Can't find state machine of requested kind");
            return Err(TransitionError::UnknownMachineKind {
                machine: machine.name().to_string(),
            });
        };

        if let Some(active) = self.active {
            self.suspend(active);
        }
        debug!(
            from = ?self.active_kind(),
            to = machine.name(),
            "Active state machine changed"
        );
        self.active = Some(target);

        self.transition(target, state, args)
    }

    fn transition(
        &mut self,
        machine: usize,
        state: H::State,
        args: Option<H::Payload>,
    ) -> Result<(), TransitionError> {
        let Planned { exit, enter, args } = self.machines[machine].transition(state, args)?;
        if let Some(slot) = exit {
            self.pending.push_back(HookCall {
                machine,
                slot,
                hook: Hook::Exit,
            });
        }
        self.pending.push_back(HookCall {
            machine,
            slot: enter,
            hook: Hook::Enter(args),
        });
        Ok(())
    }

    fn suspend(&mut self, machine: usize) {
        if let Some(slot) = self.machines[machine].suspend() {
            self.pending.push_back(HookCall {
                machine,
                slot,
                hook: Hook::Exit,
            });
        }
    }

    /// Deliver queued hooks unless a hook is already running, in which case
    /// the running dispatch loop picks them up once that hook returns.
    fn flush(&mut self) -> Result<(), TransitionError> {
        if self.dispatching {
            return Ok(());
        }

        self.dispatching = true;
        let mut first_failure = None;
        while let Some(call) = self.pending.pop_front() {
            if let Err(err) = self.deliver(call) {
                first_failure.get_or_insert(err);
            }
        }
        self.dispatching = false;

        first_failure.map_or(Ok(()), Err)
    }

    fn deliver(&mut self, call: HookCall<H::Payload>) -> Result<(), TransitionError> {
        let HookCall {
            machine,
            slot,
            hook,
        } = call;
        let Some(mut state) = self.machines[machine].take(slot) else {
            return Ok(());
        };

        let machine_kind = self.machines[machine].kind();
        let state_kind = self.machines[machine].kind_at(slot);
        trace!(
            machine = machine_kind.name(),
            state = state_kind.name(),
            hook = hook.name(),
            "Dispatching hook"
        );

        let result = {
            let mut handle = StateMachineHandle::new(self, machine);
            match hook {
                Hook::Enter(args) => state.enter_state(&mut handle, args),
                Hook::Exit => {
                    state.exit_state(&mut handle);
                    Ok(())
                }
                Hook::Tick => {
                    state.tick(&mut handle);
                    Ok(())
                }
                Hook::FixedTick => {
                    state.fixed_tick(&mut handle);
                    Ok(())
                }
                Hook::LateTick => {
                    state.late_tick(&mut handle);
                    Ok(())
                }
            }
        };
        self.machines[machine].restore(slot, state);

        result.map_err(|source| {
            error!(
                machine = machine_kind.name(),
                state = state_kind.name(),
                error = %source,
                "State rejected its transition payload"
            );
            TransitionError::Payload {
                machine: machine_kind.name().to_string(),
                state: state_kind.name().to_string(),
                source,
            }
        })
    }
}

impl<H: Hierarchy> std::fmt::Debug for MasterStateMachine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterStateMachine")
            .field("machines", &self.machines)
            .field("active", &self.active_kind())
            .field("pending", &self.pending.len())
            .finish()
    }
}
