//! Point-in-time snapshots of a master's bookkeeping.
//!
//! A snapshot records which machine is active and, per machine, the current
//! and previous state kinds. It is meant for debug overlays, logs and test
//! assertions; it is never applied back to a running master.

use crate::core::Kind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Bookkeeping of one state machine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<M: Kind, S: Kind> {
    /// Kind the machine is registered under
    pub kind: M,

    /// Current state, if the machine was ever entered
    pub current: Option<S>,

    /// State that was current before the last transition
    pub previous: Option<S>,

    /// Whether the machine was exited while keeping its current state
    pub suspended: bool,
}

/// Serializable snapshot of a master state machine.
/// Does NOT include the states themselves (not serializable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<M: Kind, S: Kind> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Active machine, if any
    pub active: Option<M>,

    /// Every machine in registration order
    pub machines: Vec<MachineSnapshot<M, S>>,
}

impl<M: Kind, S: Kind> Snapshot<M, S> {
    pub(crate) fn new(active: Option<M>, machines: Vec<MachineSnapshot<M, S>>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            active,
            machines,
        }
    }

    /// Bookkeeping of the machine registered as `kind`.
    pub fn machine(&self, kind: M) -> Option<&MachineSnapshot<M, S>> {
        self.machines.iter().find(|m| m.kind == kind)
    }

    /// Bookkeeping of the active machine.
    pub fn active_machine(&self) -> Option<&MachineSnapshot<M, S>> {
        self.active.and_then(|kind| self.machine(kind))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}
