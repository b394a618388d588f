//! Builder for constructing the master state machine.

use crate::builder::error::{BuildError, RegistrationError};
use crate::builder::machine::StateMachineBuilder;
use crate::core::{Hierarchy, Kind};
use crate::runtime::MasterStateMachine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Builder for a master state machine with a fluent API.
///
/// Every machine and state is registered here, once. Building runs no hooks:
/// the result has no active machine and no machine has a current state.
pub struct MasterBuilder<H: Hierarchy> {
    machines: Vec<StateMachineBuilder<H>>,
}

impl<H: Hierarchy> MasterBuilder<H> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machines: Vec::new(),
        }
    }

    /// Register a machine.
    pub fn machine(mut self, machine: StateMachineBuilder<H>) -> Self {
        self.machines.push(machine);
        self
    }

    /// Register several machines at once.
    pub fn machines(mut self, machines: impl IntoIterator<Item = StateMachineBuilder<H>>) -> Self {
        self.machines.extend(machines);
        self
    }

    /// Validate the registration and build the master.
    /// Returns every registration problem at once if any is found.
    pub fn build(self) -> Result<MasterStateMachine<H>, BuildError> {
        match self.validate() {
            Validation::Success(_) => {}
            Validation::Failure(errors) => {
                return Err(BuildError::Invalid {
                    violations: errors.iter().cloned().collect(),
                });
            }
        }

        debug!(machines = self.machines.len(), "Master state machine built");
        let machines = self
            .machines
            .into_iter()
            .map(StateMachineBuilder::into_machine)
            .collect();
        Ok(MasterStateMachine::new(machines))
    }

    fn validate(&self) -> Validation<(), NonEmptyVec<RegistrationError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RegistrationError>>> = Vec::new();

        if self.machines.is_empty() {
            checks.push(Validation::fail(RegistrationError::NoMachines));
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for machine in &self.machines {
            let kind = machine.kind();
            if !seen.insert(kind) && reported.insert(kind) {
                checks.push(Validation::fail(RegistrationError::DuplicateMachine {
                    machine: kind.name().to_string(),
                }));
            }
            checks.push(machine.validate());
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<H: Hierarchy> Default for MasterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
