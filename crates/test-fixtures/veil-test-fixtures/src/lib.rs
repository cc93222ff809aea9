//! Canned target kinds for exercising the transition engine in tests.
//!
//! Tags and defaults follow the stock screen-filter set (blur, pixelate,
//! twist, rgb_split, color_step, dot_screen) plus a clocked scanline kind.

use veil_transition_core::{FieldDef, KindRegistry, ParamValue, TargetSpec};

pub fn blur_spec() -> TargetSpec {
    TargetSpec::new(vec![
        FieldDef::scalar("blur", 2.0),
        FieldDef::scalar("blurX", 2.0),
        FieldDef::scalar("blurY", 2.0),
    ])
}

pub fn pixelate_spec() -> TargetSpec {
    TargetSpec::new(vec![FieldDef::record("size", [("x", 10.0), ("y", 10.0)])])
}

pub fn color_step_spec() -> TargetSpec {
    TargetSpec::new(vec![FieldDef::scalar("step", 5.0)])
}

pub fn dot_screen_spec() -> TargetSpec {
    TargetSpec::new(vec![
        FieldDef::scalar("scale", 1.0),
        FieldDef::scalar("angle", 5.0),
    ])
}

pub fn twist_spec() -> TargetSpec {
    TargetSpec::new(vec![
        FieldDef::record("offset", [("x", 0.5), ("y", 0.5)]),
        FieldDef::scalar("radius", 0.5),
        FieldDef::scalar("angle", 5.0),
    ])
}

pub fn rgb_split_spec() -> TargetSpec {
    TargetSpec::new(vec![
        FieldDef::record("red", [("x", 20.0), ("y", 20.0)]),
        FieldDef::record("green", [("x", -20.0), ("y", 20.0)]),
        FieldDef::record("blue", [("x", 20.0), ("y", -20.0)]),
    ])
}

/// Scanline shader parameters with a frame clock ("time").
pub fn scanline_spec() -> TargetSpec {
    TargetSpec::new(vec![
        FieldDef::scalar("density", 0.3),
        FieldDef::discrete("rolling", ParamValue::Flag(false)),
    ])
    .with_clock("time")
}

/// Registry with every fixture kind registered under its tag.
pub fn standard_registry() -> KindRegistry {
    let mut kinds = KindRegistry::new();
    kinds.add_spec("blur", blur_spec());
    kinds.add_spec("pixelate", pixelate_spec());
    kinds.add_spec("color_step", color_step_spec());
    kinds.add_spec("dot_screen", dot_screen_spec());
    kinds.add_spec("twist", twist_spec());
    kinds.add_spec("rgb_split", rgb_split_spec());
    kinds.add_spec("scanline", scanline_spec());
    kinds
}
