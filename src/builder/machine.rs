//! Builder for registering the states of one machine.

use crate::builder::error::RegistrationError;
use crate::core::{Hierarchy, Kind, State};
use crate::runtime::StateMachine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for one state machine's fixed state registry.
///
/// States are kept in registration order. Uniqueness of state kinds is
/// checked when the master is built.
pub struct StateMachineBuilder<H: Hierarchy> {
    kind: H::Machine,
    states: Vec<Box<dyn State<H>>>,
}

impl<H: Hierarchy> StateMachineBuilder<H> {
    /// Create a builder for the machine registered as `kind`.
    pub fn new(kind: H::Machine) -> Self {
        Self {
            kind,
            states: Vec::new(),
        }
    }

    /// Register a state.
    pub fn state<S>(mut self, state: S) -> Self
    where
        S: State<H> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Register an already boxed state.
    pub fn boxed_state(mut self, state: Box<dyn State<H>>) -> Self {
        self.states.push(state);
        self
    }

    pub fn kind(&self) -> H::Machine {
        self.kind
    }

    /// Check this machine's registry, accumulating every problem.
    pub(crate) fn validate(&self) -> Validation<(), NonEmptyVec<RegistrationError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RegistrationError>>> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(RegistrationError::EmptyMachine {
                machine: self.kind.name().to_string(),
            }));
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for state in &self.states {
            let kind = state.kind();
            let check = if !seen.insert(kind) && reported.insert(kind) {
                Validation::fail(RegistrationError::DuplicateState {
                    machine: self.kind.name().to_string(),
                    state: kind.name().to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub(crate) fn into_machine(self) -> StateMachine<H> {
        StateMachine::new(self.kind, self.states)
    }
}
