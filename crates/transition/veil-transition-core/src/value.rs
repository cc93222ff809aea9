//! Param value kinds and typed values for transition blending.
//! All numeric components use f32.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Lightweight kind enum for pattern-matching and quick dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Record,
    Flag,
    Text,
}

/// A value a target field can hold.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ParamValue {
    /// Scalar float
    Scalar(f32),

    /// Flat record of named floats, e.g. `{ "x": 4.0, "y": 4.0 }`
    Record(HashMap<String, f32>),

    /// Boolean toggle; snap-only for blending
    Flag(bool),

    /// Text / string; snap-only for blending
    Text(String),
}

impl ParamValue {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Record(_) => ParamKind::Record,
            ParamValue::Flag(_) => ParamKind::Flag,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        ParamValue::Scalar(v)
    }

    pub fn record<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        ParamValue::Record(components.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn text(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }

    /// Scalar payload, if this value is one.
    #[inline]
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            ParamValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Record payload, if this value is one.
    #[inline]
    pub fn as_record(&self) -> Option<&HashMap<String, f32>> {
        match self {
            ParamValue::Record(m) => Some(m),
            _ => None,
        }
    }
}

/// Mapping from field name to value. Transition payloads and snapshot
/// endpoints both use this shape.
pub type ValueMap = HashMap<String, ParamValue>;
