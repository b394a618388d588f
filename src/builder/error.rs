//! Build errors for state machine and master builders.

use thiserror::Error;

/// A single problem with the registered machines or states.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("No state machines registered. Add at least one with .machine(builder)")]
    NoMachines,

    #[error("State machine '{machine}' has no states. Add at least one with .state(state)")]
    EmptyMachine { machine: String },

    #[error("State machine '{machine}' is registered more than once")]
    DuplicateMachine { machine: String },

    #[error("State '{state}' is registered more than once in machine '{machine}'")]
    DuplicateState { machine: String, state: String },
}

/// Errors that can occur when building a master state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid registration: {}", render(.violations))]
    Invalid { violations: Vec<RegistrationError> },
}

impl BuildError {
    /// Every registration problem found, in registration order.
    pub fn violations(&self) -> &[RegistrationError] {
        match self {
            Self::Invalid { violations } => violations,
        }
    }
}

fn render(violations: &[RegistrationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
