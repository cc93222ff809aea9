//! Declared field descriptors for target kinds.
//!
//! Every field carries a blend-strategy tag so the engine dispatches on the
//! declaration rather than inspecting the shape of live values.

use serde::{Deserialize, Serialize};

use crate::value::ParamValue;

/// How a field blends during a transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Scalar-numeric: linear interpolation.
    Scalar,
    /// Record-numeric: each component interpolates independently.
    Record,
    /// Snap-only: holds the start value below the midpoint, the end value at
    /// or above it.
    Discrete,
}

/// One declared field on a target kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub default: ParamValue,
}

impl FieldDef {
    pub fn scalar(name: &str, default: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            default: ParamValue::Scalar(default),
        }
    }

    pub fn record<I, S>(name: &str, components: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            kind: FieldKind::Record,
            default: ParamValue::record(components),
        }
    }

    pub fn discrete(name: &str, default: ParamValue) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Discrete,
            default,
        }
    }
}

/// Field layout of a target kind, plus an optional clock field that receives
/// the owning instance's elapsed-tick count every update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TargetSpec {
    pub fields: Vec<FieldDef>,
    pub clock: Option<String>,
}

impl TargetSpec {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self {
            fields,
            clock: None,
        }
    }

    /// Name a scalar clock field, declaring it if the caller has not.
    pub fn with_clock(mut self, field: &str) -> Self {
        if !self.contains(field) {
            self.fields.push(FieldDef::scalar(field, 0.0));
        }
        self.clock = Some(field.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.name == key)
    }

    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == key)
    }

    /// Declared blend strategy for a field.
    #[inline]
    pub fn kind_of(&self, key: &str) -> Option<FieldKind> {
        self.field(key).map(|f| f.kind)
    }
}
