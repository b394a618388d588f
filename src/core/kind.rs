//! Discriminators for states and state machines.
//!
//! A [`Kind`] identifies one concrete state (or one state machine) inside its
//! registry. Kinds are plain field-less enums: the closed set of variants is
//! the set of things that can ever be registered.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a registered state or state machine.
///
/// Two registrations with equal kinds are the same thing as far as lookup is
/// concerned, so a registry holds at most one entry per kind.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: kinds are registry keys
/// - `Debug`: kinds show up in diagnostics
/// - `Serialize` + `Deserialize`: kinds appear in snapshots
///
/// # Example
///
/// ```rust
/// use statewright::core::Kind;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Screen {
///     Title,
///     Options,
/// }
///
/// impl Kind for Screen {
///     fn name(&self) -> &str {
///         match self {
///             Self::Title => "Title",
///             Self::Options => "Options",
///         }
///     }
/// }
///
/// assert_eq!(Screen::Options.name(), "Options");
/// ```
pub trait Kind:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Human readable name used in diagnostics and error messages.
    fn name(&self) -> &str;
}

/// Bundles the types one state machine hierarchy is built from.
///
/// Implemented on a marker type; every runtime type is generic over it so a
/// hierarchy only has to name its kinds and payload once.
///
/// ```rust
/// use statewright::core::Hierarchy;
/// use statewright::payload::StateData;
/// use statewright::kind_enum;
///
/// kind_enum! {
///     pub enum Mode { Menu, Gameplay }
/// }
///
/// kind_enum! {
///     pub enum Screen { Title, Playing }
/// }
///
/// struct Game;
///
/// impl Hierarchy for Game {
///     type Machine = Mode;
///     type State = Screen;
///     type Payload = StateData;
/// }
/// ```
pub trait Hierarchy: 'static {
    /// Discriminator of the state machines owned by the master.
    type Machine: Kind;

    /// Discriminator of the states owned by each machine.
    type State: Kind;

    /// Data handed to a state's enter hook.
    type Payload: 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKind {
        Idle,
        Running,
        Stopped,
    }

    impl Kind for TestKind {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Stopped => "Stopped",
            }
        }
    }

    #[test]
    fn kind_name_returns_correct_value() {
        assert_eq!(TestKind::Idle.name(), "Idle");
        assert_eq!(TestKind::Running.name(), "Running");
        assert_eq!(TestKind::Stopped.name(), "Stopped");
    }

    #[test]
    fn kinds_work_as_map_keys() {
        let mut slots = std::collections::HashMap::new();
        slots.insert(TestKind::Idle, 0usize);
        slots.insert(TestKind::Running, 1usize);

        assert_eq!(slots.get(&TestKind::Running), Some(&1));
        assert_eq!(slots.get(&TestKind::Stopped), None);
    }

    #[test]
    fn kind_serializes_correctly() {
        let kind = TestKind::Running;
        let json = serde_json::to_string(&kind).unwrap();
        let deserialized: TestKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, deserialized);
    }
}
