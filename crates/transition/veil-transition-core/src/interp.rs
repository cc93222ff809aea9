//! Blend helpers:
//! - lerp_f32
//! - blend_value (declared-kind dispatch at a mid-transition delta)
//! - settle_value (exact end values, no residual interpolation error)

use hashbrown::HashMap;

use crate::fields::FieldKind;
use crate::value::ParamValue;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Snap semantics for anything that cannot be blended.
#[inline]
fn step_value(start: &ParamValue, end: &ParamValue, delta: f32) -> ParamValue {
    if delta < 0.5 {
        start.clone()
    } else {
        end.clone()
    }
}

/// Component-wise record blend. Components the end snapshot does not mention
/// keep their live values; a start component missing for an end component
/// falls back to the live value.
fn blend_record(
    start: &HashMap<String, f32>,
    end: &HashMap<String, f32>,
    live: &HashMap<String, f32>,
    delta: f32,
) -> HashMap<String, f32> {
    let mut out = live.clone();
    for (comp, e) in end {
        let s = start
            .get(comp)
            .or_else(|| live.get(comp))
            .copied()
            .unwrap_or(*e);
        out.insert(comp.clone(), lerp_f32(s, *e, delta));
    }
    out
}

/// Blend one field at `delta` in (0, 1) according to its declared kind.
/// Shape mismatches degrade to snapping.
pub fn blend_value(
    kind: FieldKind,
    start: &ParamValue,
    end: &ParamValue,
    live: &ParamValue,
    delta: f32,
) -> ParamValue {
    match kind {
        FieldKind::Scalar => match (start, end) {
            (ParamValue::Scalar(a), ParamValue::Scalar(b)) => {
                ParamValue::Scalar(lerp_f32(*a, *b, delta))
            }
            _ => step_value(start, end, delta),
        },
        FieldKind::Record => match (end, live) {
            (ParamValue::Record(e), ParamValue::Record(l)) => {
                let empty = HashMap::new();
                let s = start.as_record().unwrap_or(&empty);
                ParamValue::Record(blend_record(s, e, l, delta))
            }
            _ => step_value(start, end, delta),
        },
        FieldKind::Discrete => step_value(start, end, delta),
    }
}

/// Exact end value for a field at 100% progress. Record components the end
/// snapshot does not mention keep their live values.
pub fn settle_value(kind: FieldKind, end: &ParamValue, live: &ParamValue) -> ParamValue {
    match (kind, end, live) {
        (FieldKind::Record, ParamValue::Record(e), ParamValue::Record(l)) => {
            let mut out = l.clone();
            for (comp, v) in e {
                out.insert(comp.clone(), *v);
            }
            ParamValue::Record(out)
        }
        _ => end.clone(),
    }
}
