//! Merged paths must cover exactly the pixels the separate paths cover.

use pathopt_optimizer::{ComputedStyle, Element, MergePaths};
use pathopt_path::{parse_path, Command, Opcode};
use pathopt_settings::MergeSettings;
use tiny_skia::FillRule;

use crate::render::fill;

fn merge(paths: &[&str]) -> Vec<Element> {
    let mut siblings: Vec<Element> = paths
        .iter()
        .map(|d| Element::new("path").with_attr("d", *d).with_attr("fill", "#000"))
        .collect();
    MergePaths::new(MergeSettings::default())
        .merge_siblings(&mut siblings, |e| ComputedStyle::from_attributes(e, None));
    siblings
}

fn assert_same_coverage(paths: &[&str]) {
    let merged = merge(paths);
    assert_eq!(merged.len(), 1, "{:?} should merge", paths);
    let merged_d = merged[0].attr("d").unwrap();
    for rule in [FillRule::Winding, FillRule::EvenOdd] {
        assert_eq!(fill(paths, rule), fill(&[merged_d], rule), "{:?}", paths);
    }
}

#[test]
fn test_squares_render_identically() {
    assert_same_coverage(&["M4,4h20v20h-20z", "M40,4h20v20h-20z", "M4,50h20v20h-20z"]);
}

#[test]
fn test_curved_shapes_render_identically() {
    assert_same_coverage(&[
        "M10 30a15 15 0 1 0 30 0a15 15 0 1 0-30 0z",
        "M50 10q20 0 20 20t20 20l-10 10z",
        "M10 60c0 20 30 20 30 0z",
    ]);
}

#[test]
fn test_overlapping_shapes_not_merged() {
    let merged = merge(&["M4,4h30v30h-30z", "M20,20h30v30h-30z"]);
    assert_eq!(merged.len(), 2);
    // Translucent paint shows why: the shared corner is painted twice.
    let separate = fill(&["M4,4h30v30h-30z", "M20,20h30v30h-30z"], FillRule::Winding);
    let joined = fill(&["M4,4h30v30h-30zM20,20h30v30h-30z"], FillRule::Winding);
    assert_ne!(separate, joined);
}

#[test]
fn test_curve_conversion_only_emits_basic_commands() {
    let commands = parse_path("M0 0 H5 V5 S10 10 15 5 T20 0 A3 3 0 0 1 26 0 Z").to_absolute_curves();
    assert!(commands.iter().all(|c: &Command| {
        !c.relative
            && matches!(
                c.opcode,
                Opcode::MoveTo | Opcode::LineTo | Opcode::CurveTo | Opcode::ClosePath
            )
    }));
}
