//! A single state machine: a fixed registry of states and its bookkeeping.

use crate::core::{Hierarchy, Kind, State};
use crate::runtime::error::TransitionError;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A hook invocation waiting to be delivered to a state.
pub(crate) enum Hook<P> {
    Enter(Option<P>),
    Exit,
    Tick,
    FixedTick,
    LateTick,
}

impl<P> Hook<P> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Enter(_) => "enter",
            Self::Exit => "exit",
            Self::Tick => "tick",
            Self::FixedTick => "fixed_tick",
            Self::LateTick => "late_tick",
        }
    }
}

/// Hooks produced by an accepted transition, in delivery order.
pub(crate) struct Planned<P> {
    pub(crate) exit: Option<usize>,
    pub(crate) enter: usize,
    pub(crate) args: Option<P>,
}

/// Owns a fixed set of uniquely-kinded states, at most one of them current.
///
/// States are addressed by slot (registration order). `current` and
/// `previous` are slots into the same registry, so they can never point at a
/// state the machine does not own.
pub struct StateMachine<H: Hierarchy> {
    kind: H::Machine,
    states: Vec<Option<Box<dyn State<H>>>>,
    kinds: Vec<H::State>,
    index: HashMap<H::State, usize>,
    current: Option<usize>,
    previous: Option<usize>,
    suspended: bool,
}

impl<H: Hierarchy> StateMachine<H> {
    /// Registration is validated by the builder; kinds here are unique.
    pub(crate) fn new(kind: H::Machine, states: Vec<Box<dyn State<H>>>) -> Self {
        let kinds: Vec<H::State> = states.iter().map(|s| s.kind()).collect();
        let mut index = HashMap::with_capacity(kinds.len());
        for (slot, state_kind) in kinds.iter().enumerate() {
            index.entry(*state_kind).or_insert(slot);
        }

        Self {
            kind,
            states: states.into_iter().map(Some).collect(),
            kinds,
            index,
            current: None,
            previous: None,
            suspended: false,
        }
    }

    /// Kind this machine is registered under.
    pub fn kind(&self) -> H::Machine {
        self.kind
    }

    /// Kind of the current state, `None` before the first transition.
    pub fn current_kind(&self) -> Option<H::State> {
        self.current.map(|slot| self.kinds[slot])
    }

    /// Kind of the state that was current before the last transition.
    pub fn previous_kind(&self) -> Option<H::State> {
        self.previous.map(|slot| self.kinds[slot])
    }

    /// True after `exit` until the next accepted transition.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// True when ticks reach a state.
    pub fn is_running(&self) -> bool {
        self.running_slot().is_some()
    }

    /// Registered state kinds in registration order.
    pub fn state_kinds(&self) -> impl Iterator<Item = H::State> + '_ {
        self.kinds.iter().copied()
    }

    /// True when a state of `kind` is registered here.
    pub fn contains(&self, kind: H::State) -> bool {
        self.index.contains_key(&kind)
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false for a built machine; registration rejects empty ones.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub(crate) fn kind_at(&self, slot: usize) -> H::State {
        self.kinds[slot]
    }

    /// Slot that ticks are routed to.
    pub(crate) fn running_slot(&self) -> Option<usize> {
        self.current.filter(|_| !self.suspended)
    }

    /// Validate a transition to `target` and apply it to the bookkeeping.
    ///
    /// Nothing is mutated when the request is rejected. On success the old
    /// state (if it was still entered) must be exited before the new one is
    /// entered.
    pub(crate) fn transition(
        &mut self,
        target: H::State,
        args: Option<H::Payload>,
    ) -> Result<Planned<H::Payload>, TransitionError> {
        if let Some(slot) = self.running_slot() {
            if self.kinds[slot] == target {
                warn!(
                    machine = self.kind.name(),
                    state = target.name(),
                    "Trying to change to a state that is already active"
                );
                return Err(TransitionError::RedundantTransition {
                    machine: self.kind.name().to_string(),
                    state: target.name().to_string(),
                });
            }
        }

        let Some(&next) = self.index.get(&target) else {
            warn!(
                machine = self.kind.name(),
                state = target.name(),
                "Can't find state of requested kind"
            );
            return Err(TransitionError::UnknownStateKind {
                machine: self.kind.name().to_string(),
                state: target.name().to_string(),
            });
        };

        let from = self.current_kind();
        let exit = self.running_slot();
        let resuming = self.suspended && self.current == Some(next);
        if !resuming {
            self.previous = self.current;
        }
        self.current = Some(next);
        self.suspended = false;

        debug!(
            machine = self.kind.name(),
            from = ?from,
            to = target.name(),
            resuming,
            "State changed"
        );

        Ok(Planned {
            exit,
            enter: next,
            args,
        })
    }

    /// Deactivate the machine, returning the slot whose exit hook must run.
    ///
    /// Current and previous are retained. A machine that is already suspended,
    /// or was never entered, has nothing to exit.
    pub(crate) fn suspend(&mut self) -> Option<usize> {
        let slot = self.running_slot()?;
        self.suspended = true;
        debug!(machine = self.kind.name(), state = self.kinds[slot].name(), "Machine suspended");
        Some(slot)
    }

    pub(crate) fn take(&mut self, slot: usize) -> Option<Box<dyn State<H>>> {
        self.states.get_mut(slot).and_then(Option::take)
    }

    pub(crate) fn restore(&mut self, slot: usize, state: Box<dyn State<H>>) {
        if let Some(entry) = self.states.get_mut(slot) {
            *entry = Some(state);
        }
    }
}

impl<H: Hierarchy> std::fmt::Debug for StateMachine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("kind", &self.kind)
            .field("states", &self.kinds)
            .field("current", &self.current_kind())
            .field("previous", &self.previous_kind())
            .field("suspended", &self.suspended)
            .finish()
    }
}
