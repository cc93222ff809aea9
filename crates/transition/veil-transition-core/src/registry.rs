//! Registry of constructible target kinds.
//!
//! Hosts populate the registry before any `prepare` call that references a
//! tag; unregistered tags make `prepare` a no-op.

use std::fmt;

use hashbrown::HashMap;

use crate::fields::TargetSpec;
use crate::target::{MapTarget, Target};

/// Factory for one registered kind.
pub type TargetFactory = Box<dyn Fn() -> Box<dyn Target>>;

/// Mapping from kind tag to target factory.
#[derive(Default)]
pub struct KindRegistry {
    kinds: HashMap<String, TargetFactory>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `tag`, replacing any previous registration.
    pub fn add<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn() -> Box<dyn Target> + 'static,
    {
        self.kinds.insert(tag.to_string(), Box::new(factory));
    }

    /// Register a declarative kind backed by `MapTarget`.
    pub fn add_spec(&mut self, tag: &str, spec: TargetSpec) {
        self.add(tag, move || -> Box<dyn Target> {
            Box::new(MapTarget::new(spec.clone()))
        });
    }

    /// Drop a registration. Instances already prepared from it keep running
    /// but are omitted from exports.
    pub fn remove(&mut self, tag: &str) {
        self.kinds.remove(tag);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.kinds.contains_key(tag)
    }

    /// Construct a fresh target of the given kind.
    pub fn instantiate(&self, tag: &str) -> Option<Box<dyn Target>> {
        self.kinds.get(tag).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("tags", &self.kinds.keys().collect::<Vec<_>>())
            .finish()
    }
}
