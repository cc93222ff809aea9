//! Target capability and the stock map-backed implementation.
//!
//! The engine reads and writes host state only through this trait: get/set of
//! declared named fields, plus an optional per-tick clock. Hosts that mirror
//! values into GPU uniforms or other foreign objects implement it themselves;
//! `MapTarget` covers kinds that are plain parameter bags.

use std::fmt;

use crate::fields::TargetSpec;
use crate::value::{ParamValue, ValueMap};

/// Narrow capability the engine requires of the object it animates.
pub trait Target: fmt::Debug {
    /// Declared field layout for this target.
    fn spec(&self) -> &TargetSpec;

    /// Current value of a declared field.
    fn get(&self, key: &str) -> Option<ParamValue>;

    /// Overwrite a declared field. Implementations ignore unknown keys.
    fn set(&mut self, key: &str, value: ParamValue);

    /// Per-tick clock hook; `frame` is the owning instance's age in ticks.
    /// Targets without a clock field ignore it.
    fn tick(&mut self, frame: u64) {
        let _ = frame;
    }

    fn has_field(&self, key: &str) -> bool {
        self.spec().contains(key)
    }
}

/// `Target` backed by a value map seeded from the spec's defaults.
#[derive(Clone, Debug)]
pub struct MapTarget {
    spec: TargetSpec,
    values: ValueMap,
}

impl MapTarget {
    pub fn new(spec: TargetSpec) -> Self {
        let mut values = ValueMap::default();
        for field in &spec.fields {
            values.insert(field.name.clone(), field.default.clone());
        }
        Self { spec, values }
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }
}

impl Target for MapTarget {
    fn spec(&self) -> &TargetSpec {
        &self.spec
    }

    fn get(&self, key: &str) -> Option<ParamValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: ParamValue) {
        if self.spec.contains(key) {
            self.values.insert(key.to_string(), value);
        }
    }

    fn tick(&mut self, frame: u64) {
        if let Some(clock) = &self.spec.clock {
            self.values
                .insert(clock.clone(), ParamValue::Scalar(frame as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldDef;

    #[test]
    fn defaults_seed_the_value_map() {
        let target = MapTarget::new(TargetSpec::new(vec![FieldDef::scalar("blur", 2.0)]));
        assert_eq!(target.get("blur"), Some(ParamValue::Scalar(2.0)));
        assert_eq!(target.get("nope"), None);
    }

    #[test]
    fn set_ignores_undeclared_keys() {
        let mut target = MapTarget::new(TargetSpec::new(vec![FieldDef::scalar("blur", 2.0)]));
        target.set("bogus", ParamValue::f(1.0));
        assert_eq!(target.get("bogus"), None);
    }

    #[test]
    fn tick_writes_the_clock_field() {
        let mut target = MapTarget::new(TargetSpec::new(vec![]).with_clock("time"));
        target.tick(7);
        assert_eq!(target.get("time"), Some(ParamValue::Scalar(7.0)));
    }
}
