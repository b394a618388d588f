//! Transition payloads.
//!
//! The runtime never looks inside a payload; it hands whatever the requester
//! supplied to the entered state's enter hook. A hierarchy either uses a
//! closed enum as its payload type or the opaque [`StateData`] box, in which
//! case the entered state recovers the concrete shape with [`downcast`] or
//! [`downcast_opt`].

use std::any::{type_name, Any};
use thiserror::Error;

/// Opaque payload: any value, recovered by downcasting on entry.
pub type StateData = Box<dyn Any>;

/// Raised by a state's enter hook when it cannot use the payload it was given.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayloadError {
    #[error("expected a payload of type {expected}, got none")]
    Missing { expected: &'static str },

    #[error("expected a payload of type {expected}, got a different type")]
    Mismatch { expected: &'static str },

    #[error("invalid payload: {0}")]
    Invalid(String),
}

/// Wrap a value as an opaque payload.
pub fn pack<T: Any>(value: T) -> Option<StateData> {
    Some(Box::new(value))
}

/// Recover a required payload of type `T`.
///
/// ```rust
/// use statewright::payload::{downcast, pack, PayloadError};
///
/// let level: u32 = downcast(pack(3u32)).unwrap();
/// assert_eq!(level, 3);
///
/// let missing = downcast::<u32>(None);
/// assert!(matches!(missing, Err(PayloadError::Missing { .. })));
/// ```
pub fn downcast<T: Any>(args: Option<StateData>) -> Result<T, PayloadError> {
    downcast_opt(args)?.ok_or(PayloadError::Missing {
        expected: type_name::<T>(),
    })
}

/// Recover an optional payload of type `T`; absence is fine, a wrong type is not.
pub fn downcast_opt<T: Any>(args: Option<StateData>) -> Result<Option<T>, PayloadError> {
    match args {
        None => Ok(None),
        Some(data) => data
            .downcast::<T>()
            .map(|value| Some(*value))
            .map_err(|_| PayloadError::Mismatch {
                expected: type_name::<T>(),
            }),
    }
}
