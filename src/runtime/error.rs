//! Errors reported by transition requests.

use crate::payload::PayloadError;
use thiserror::Error;

/// Why a transition request failed.
///
/// The first three variants are lookup failures: nothing was mutated. A
/// `Payload` error means the transition itself happened but the entered
/// state rejected its payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("State '{state}' is already the active state of machine '{machine}'")]
    RedundantTransition { machine: String, state: String },

    #[error("Machine '{machine}' has no state of kind '{state}'")]
    UnknownStateKind { machine: String, state: String },

    #[error("No state machine of kind '{machine}' is registered")]
    UnknownMachineKind { machine: String },

    #[error("State '{state}' of machine '{machine}' rejected its payload: {source}")]
    Payload {
        machine: String,
        state: String,
        #[source]
        source: PayloadError,
    },
}

impl TransitionError {
    /// True for the failures that leave every machine untouched.
    pub fn is_lookup_failure(&self) -> bool {
        !matches!(self, Self::Payload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_machine_and_state() {
        let err = TransitionError::UnknownStateKind {
            machine: "Menu".to_string(),
            state: "Credits".to_string(),
        };
        assert_eq!(err.to_string(), "Machine 'Menu' has no state of kind 'Credits'");
    }

    #[test]
    fn payload_errors_are_not_lookup_failures() {
        let err = TransitionError::Payload {
            machine: "Gameplay".to_string(),
            state: "Playing".to_string(),
            source: PayloadError::Invalid("level out of range".to_string()),
        };
        assert!(!err.is_lookup_failure());
        assert!(std::error::Error::source(&err).is_some());

        let lookup = TransitionError::UnknownMachineKind {
            machine: "Editor".to_string(),
        };
        assert!(lookup.is_lookup_failure());
    }
}
