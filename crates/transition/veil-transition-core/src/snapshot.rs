//! Serializable engine state for host save/load boundaries.
//!
//! Export captures, per persisted instance, its identity, kind tag, touched
//! keys, and the live target value at each key, plus the identities that were
//! applied at export time. Import is a replay: re-prepare every entry, then
//! re-mark the recorded identities as applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::ValueMap;

/// Errors produced while encoding or decoding snapshot JSON.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot json parse error: {0}")]
    Parse(String),
    #[error("serialize snapshot: {0}")]
    Serialize(String),
}

/// One persisted instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub identity: String,
    pub kind: String,
    pub keys: Vec<String>,
    pub values: ValueMap,
}

/// Full persisted view of an engine, ordered by identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    #[serde(default)]
    pub instances: Vec<InstanceSnapshot>,
    #[serde(default)]
    pub active: Vec<String>,
}

impl EngineSnapshot {
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.active.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialize(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(|e| SnapshotError::Parse(e.to_string()))
    }
}
