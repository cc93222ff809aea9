//! Veil Transition Core (host-agnostic)
//!
//! A registry of named parameter sets ("instances"), each wrapping a keyed
//! target supplied by the host, blended linearly from a start snapshot to an
//! end snapshot over a frame count, with an optional queued completion stage
//! that removes the instance when it finishes. The engine is driven by one
//! `update()` call per rendered frame, is single-threaded, and never fails:
//! bad tags, identities, and keys degrade to logged no-ops.

pub mod engine;
pub mod fields;
pub mod interp;
pub mod registry;
pub mod snapshot;
pub mod target;
pub mod value;

// Re-exports for consumers (hosts and fixtures)
pub use engine::Engine;
pub use fields::{FieldDef, FieldKind, TargetSpec};
pub use registry::{KindRegistry, TargetFactory};
pub use snapshot::{EngineSnapshot, InstanceSnapshot, SnapshotError};
pub use target::{MapTarget, Target};
pub use value::{ParamKind, ParamValue, ValueMap};
