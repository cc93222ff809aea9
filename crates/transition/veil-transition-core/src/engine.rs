//! Engine: owned transition state and the public API.
//!
//! Methods:
//! - new, prepare, prepare_transient, execute, complete, update (one call per
//!   rendered frame), pause controls, export/import, reset
//!
//! Every operation is a no-fail policy: unknown tags, identities, and keys
//! degrade to logged no-ops so script input can never crash a render loop.

use hashbrown::HashMap;
use log::debug;
use uuid::Uuid;

use crate::interp::{blend_value, settle_value};
use crate::registry::KindRegistry;
use crate::snapshot::{EngineSnapshot, InstanceSnapshot};
use crate::target::Target;
use crate::value::{ParamValue, ValueMap};

/// A registered, independently animated parameter set bound to one target.
#[derive(Debug)]
struct Instance {
    kind: String,
    target: Box<dyn Target>,
    /// Keys touched by at least one call, in first-touch order.
    keys: Vec<String>,
    start: ValueMap,
    end: ValueMap,
    /// Accumulated values for the queued completion stage.
    complete: ValueMap,
    frames: Option<u32>,
    complete_frames: Option<u32>,
    /// None while no transition is in progress.
    elapsed: Option<u32>,
    /// The running end snapshot is the completion stage; finishing it removes
    /// the instance.
    completing: bool,
    no_save: bool,
    paused: bool,
    /// Ticks survived since prepare; fed to the target's clock.
    age: u64,
}

impl Instance {
    /// Reset the end snapshot and start a new stage toward `values`.
    fn begin_stage(&mut self, values: Option<&ValueMap>, frames: u32) {
        self.end.clear();
        if let Some(values) = values {
            for (key, value) in values {
                if !self.target.has_field(key) {
                    continue;
                }
                if !self.keys.iter().any(|k| k == key) {
                    self.keys.push(key.clone());
                }
                if let Some(live) = self.target.get(key) {
                    self.start.insert(key.clone(), live);
                }
                self.end.insert(key.clone(), value.clone());
            }
        }
        self.frames = Some(frames);
        self.elapsed = Some(0);
    }

    /// Swap the queued completion stage in as the running stage.
    fn promote(&mut self) {
        self.start = std::mem::take(&mut self.end);
        self.end = self.complete.clone();
        self.frames = self.complete_frames;
        self.elapsed = Some(0);
        self.completing = true;
        // Keys introduced only by the completion stage still need start values.
        for key in self.end.keys() {
            if !self.start.contains_key(key) {
                if let Some(live) = self.target.get(key) {
                    self.start.insert(key.clone(), live);
                }
            }
        }
    }

    /// Write interpolated values for every key of the running stage.
    fn blend_tick(&mut self, delta: f32) {
        for (key, end) in &self.end {
            let Some(kind) = self.target.spec().kind_of(key) else {
                continue;
            };
            let Some(live) = self.target.get(key) else {
                continue;
            };
            let start = self.start.get(key).unwrap_or(end);
            self.target.set(key, blend_value(kind, start, end, &live, delta));
        }
    }

    /// Snap every key of the running stage to its exact end value.
    fn settle(&mut self) {
        for (key, end) in &self.end {
            let Some(kind) = self.target.spec().kind_of(key) else {
                continue;
            };
            let Some(live) = self.target.get(key) else {
                continue;
            };
            self.target.set(key, settle_value(kind, end, &live));
        }
    }
}

/// Owned engine state: kind registry, instance registry, active-render list.
/// Create one at startup; hosts reset it at scene boundaries of their
/// choosing and drive it with one `update()` per rendered frame.
#[derive(Debug)]
pub struct Engine {
    kinds: KindRegistry,
    instances: HashMap<String, Instance>,
    active: Vec<String>,
    dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(KindRegistry::new())
    }
}

impl Engine {
    pub fn new(kinds: KindRegistry) -> Self {
        Self {
            kinds,
            instances: HashMap::new(),
            active: Vec::new(),
            dirty: false,
        }
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    /// Hosts may register or drop kinds at any time.
    pub fn kinds_mut(&mut self) -> &mut KindRegistry {
        &mut self.kinds
    }

    /// Bind `identity` to a fresh instance of `kind`, replacing any previous
    /// registration under the same identity. Recognized `initial` keys are
    /// applied to the target and recorded as touched, with their defaults
    /// captured as the start snapshot. Unknown kinds leave everything
    /// untouched and return false.
    pub fn prepare(&mut self, kind: &str, identity: &str, initial: Option<&ValueMap>) -> bool {
        let Some(mut target) = self.kinds.instantiate(kind) else {
            debug!("prepare ignored: unknown target kind {kind:?}");
            return false;
        };
        if self.instances.remove(identity).is_some() {
            drop_active(&mut self.active, &mut self.dirty, identity);
        }
        let mut keys = Vec::new();
        let mut start = ValueMap::default();
        if let Some(values) = initial {
            for (key, value) in values {
                if !target.has_field(key) {
                    continue;
                }
                if let Some(default) = target.get(key) {
                    start.insert(key.clone(), default);
                }
                target.set(key, value.clone());
                keys.push(key.clone());
            }
        }
        self.instances.insert(
            identity.to_string(),
            Instance {
                kind: kind.to_string(),
                target,
                keys,
                start,
                end: ValueMap::default(),
                complete: ValueMap::default(),
                frames: None,
                complete_frames: None,
                elapsed: None,
                completing: false,
                no_save: false,
                paused: false,
                age: 0,
            },
        );
        true
    }

    /// Prepare under a generated identity and exclude the instance from
    /// export. Returns the identity for later execute/complete calls.
    pub fn prepare_transient(&mut self, kind: &str, initial: Option<&ValueMap>) -> Option<String> {
        if !self.kinds.contains(kind) {
            return None;
        }
        let identity = Uuid::new_v4().to_string();
        self.prepare(kind, &identity, initial);
        if let Some(inst) = self.instances.get_mut(&identity) {
            inst.no_save = true;
        }
        Some(identity)
    }

    /// Start (or override) the current transition toward `values` over
    /// `frames` ticks. `frames == 0` applies the values on the next tick.
    /// No-op once a completion has been requested.
    pub fn execute(&mut self, identity: &str, values: Option<&ValueMap>, frames: u32) {
        let Some(inst) = self.instances.get_mut(identity) else {
            debug!("execute ignored: no instance {identity:?}");
            return;
        };
        if inst.complete_frames.is_some() {
            return;
        }
        if inst.frames.is_none() {
            mark_active(&mut self.active, &mut self.dirty, identity);
        }
        inst.begin_stage(values, frames);
    }

    /// Queue the terminating transition: once the current transition (if any)
    /// finishes, blend toward `values` over `frames` ticks, then remove the
    /// instance. Idempotent once requested, and the instance is excluded from
    /// export from this point on.
    ///
    /// Special case: completing an instance that has never executed has
    /// nothing to wind down, so the request collapses to an instant
    /// apply-then-remove — `values` land on the next tick and the instance is
    /// gone right after, regardless of `frames`.
    pub fn complete(&mut self, identity: &str, values: Option<&ValueMap>, frames: u32) {
        let Some(inst) = self.instances.get_mut(identity) else {
            debug!("complete ignored: no instance {identity:?}");
            return;
        };
        if inst.complete_frames.is_some() {
            return;
        }
        inst.no_save = true;
        if inst.frames.is_none() {
            mark_active(&mut self.active, &mut self.dirty, identity);
            inst.begin_stage(values, 0);
            inst.complete = inst.end.clone();
            inst.complete_frames = Some(0);
            inst.completing = true;
        } else {
            if let Some(values) = values {
                for (key, value) in values {
                    if !inst.target.has_field(key) {
                        continue;
                    }
                    if !inst.keys.iter().any(|k| k == key) {
                        inst.keys.push(key.clone());
                    }
                    inst.complete.insert(key.clone(), value.clone());
                }
            }
            inst.complete_frames = Some(frames);
            if inst.elapsed.is_none() {
                inst.promote();
            }
        }
    }

    /// Advance every unpaused instance one tick. Call exactly once per
    /// rendered frame. The set of instances processed is fixed at entry, and
    /// instances finishing their completion stage are removed only after the
    /// pass, so their exact final values are applied for this frame.
    pub fn update(&mut self) {
        let identities: Vec<String> = self.instances.keys().cloned().collect();
        let mut finished: Vec<String> = Vec::new();

        for identity in identities {
            let Some(inst) = self.instances.get_mut(&identity) else {
                continue;
            };
            if inst.paused {
                continue;
            }
            inst.target.tick(inst.age);
            inst.age += 1;

            let (Some(elapsed), Some(frames)) = (inst.elapsed, inst.frames) else {
                continue;
            };
            let elapsed = elapsed + 1;
            inst.elapsed = Some(elapsed);

            if elapsed < frames {
                inst.blend_tick(elapsed as f32 / frames as f32);
            } else {
                inst.settle();
                if inst.completing {
                    finished.push(identity);
                } else if inst.complete_frames.is_some() {
                    inst.promote();
                } else {
                    inst.elapsed = None;
                }
            }
        }

        for identity in finished {
            self.instances.remove(&identity);
            drop_active(&mut self.active, &mut self.dirty, &identity);
        }
    }

    /// Suspend or resume all time advancement for one instance.
    pub fn set_paused(&mut self, identity: &str, paused: bool) {
        if let Some(inst) = self.instances.get_mut(identity) {
            inst.paused = paused;
        }
    }

    /// Suspend every registered instance (e.g. while an overlay scene runs).
    pub fn pause_all(&mut self) {
        for inst in self.instances.values_mut() {
            inst.paused = true;
        }
    }

    pub fn resume_all(&mut self) {
        for inst in self.instances.values_mut() {
            inst.paused = false;
        }
    }

    /// Discard every instance and clear the active list. Hosts call this at
    /// scene boundaries where no transition state should survive.
    pub fn reset(&mut self) {
        self.instances.clear();
        self.active.clear();
        self.dirty = true;
    }

    /// Serializable view of the persisted instances, ordered by identity.
    /// Transient instances, completing instances, and instances whose kind is
    /// no longer registered are omitted.
    pub fn export(&self) -> EngineSnapshot {
        let mut snapshot = EngineSnapshot::default();
        let mut identities: Vec<&String> = self.instances.keys().collect();
        identities.sort();
        for identity in identities {
            let inst = &self.instances[identity];
            if inst.no_save || !self.kinds.contains(&inst.kind) {
                continue;
            }
            let mut values = ValueMap::default();
            for key in &inst.keys {
                if let Some(value) = inst.target.get(key) {
                    values.insert(key.clone(), value);
                }
            }
            if self.active.iter().any(|a| a == identity) {
                snapshot.active.push(identity.clone());
            }
            snapshot.instances.push(InstanceSnapshot {
                identity: identity.clone(),
                kind: inst.kind.clone(),
                keys: inst.keys.clone(),
                values,
            });
        }
        snapshot
    }

    /// Rebuild instances from a snapshot: re-prepare each entry, then re-mark
    /// the recorded identities as applied. Entries with unknown kinds are
    /// dropped the same way `prepare` drops them.
    pub fn import(&mut self, snapshot: &EngineSnapshot) {
        for entry in &snapshot.instances {
            self.prepare(&entry.kind, &entry.identity, Some(&entry.values));
        }
        for identity in &snapshot.active {
            if self.instances.contains_key(identity) {
                mark_active(&mut self.active, &mut self.dirty, identity);
            } else {
                debug!("import: skipping unknown active identity {identity:?}");
            }
        }
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.instances.contains_key(identity)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_active(&self, identity: &str) -> bool {
        self.active.iter().any(|a| a == identity)
    }

    /// Identities currently applied, in activation order.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// True once after any activation change; cleared by the call. Hosts use
    /// this to know when to re-apply their render set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Live value of a declared field on an instance's target.
    pub fn live_value(&self, identity: &str, key: &str) -> Option<ParamValue> {
        self.instances
            .get(identity)
            .and_then(|inst| inst.target.get(key))
    }

    /// Keys touched so far, in first-touch order.
    pub fn touched_keys(&self, identity: &str) -> Option<&[String]> {
        self.instances
            .get(identity)
            .map(|inst| inst.keys.as_slice())
    }

    /// True while a transition is running (not merely registered or idle).
    pub fn in_transition(&self, identity: &str) -> bool {
        self.instances
            .get(identity)
            .is_some_and(|inst| inst.elapsed.is_some())
    }

    pub fn is_paused(&self, identity: &str) -> bool {
        self.instances
            .get(identity)
            .is_some_and(|inst| inst.paused)
    }
}

fn mark_active(active: &mut Vec<String>, dirty: &mut bool, identity: &str) {
    if !active.iter().any(|a| a == identity) {
        active.push(identity.to_string());
        *dirty = true;
    }
}

fn drop_active(active: &mut Vec<String>, dirty: &mut bool, identity: &str) {
    if let Some(pos) = active.iter().position(|a| a == identity) {
        active.remove(pos);
        *dirty = true;
    }
}
