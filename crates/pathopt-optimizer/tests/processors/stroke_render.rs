//! Optimized stroked paths must draw the same pixels as the input.

use pathopt_optimizer::{ComputedStyle, Element, Optimizer};

use crate::render::stroke;

const WIDTH: f32 = 2.0;

/// Alpha change that counts a pixel as different
const ALPHA_SLACK: u8 = 64;

fn optimize_stroked(d: &str) -> String {
    let mut path = Element::new("path")
        .with_attr("d", d)
        .with_attr("fill", "none")
        .with_attr("stroke", "#000");
    let style = ComputedStyle::from_attributes(&path, None);
    Optimizer::default().optimize_element(&mut path, &style);
    path.attr("d").unwrap_or_default().to_string()
}

fn differing_pixels(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b)
        .filter(|(x, y)| x.abs_diff(**y) > ALPHA_SLACK)
        .count()
}

fn assert_same_stroke(d: &str) -> String {
    let optimized = optimize_stroked(d);
    let before = stroke(d, WIDTH);
    let after = stroke(&optimized, WIDTH);
    assert!(before.iter().any(|&a| a > 0), "{} draws nothing", d);
    let diff = differing_pixels(&before, &after);
    assert!(diff <= 2, "{} -> {}: {} pixels differ", d, optimized, diff);
    optimized
}

#[test]
fn test_zero_length_shorthand_loop_kept() {
    let optimized = assert_same_stroke("M40 10 c40 0 40 40 0 40 s0 0 0 0");
    assert!(optimized.ends_with("s0,0,0,0"), "{}", optimized);
    assert_same_stroke("M10 70 q10 -10 20 0 t0 0 l20 0");
}

#[test]
fn test_zero_length_segments_dropped_invisibly() {
    assert_same_stroke("M10 10 l0 0 h20 l0 0 v20 c0 0 0 0 0 0 h-20");
    assert_same_stroke("M20 90 l30 0 a0 0 0 0 1 0 0 q0 0 0 0 l0 20");
}

#[test]
fn test_collapsed_lines_stroke_identically() {
    let optimized = assert_same_stroke("M10 10 l0 0 h20 h20 v10 v10");
    assert_eq!(optimized, "M10,10h40v20");
    assert_same_stroke("M60 60 l10 10 l10 10 l10 10");
}

#[test]
fn test_smooth_conversions_stroke_identically() {
    let optimized = assert_same_stroke("M10 100 C20 90 30 90 40 100 C50 110 60 110 70 100");
    assert!(optimized.contains('s'), "{}", optimized);
    assert_same_stroke("M10 40 Q25 20 40 40 Q55 60 70 40");
}

#[test]
fn test_arcs_stroke_identically() {
    let optimized = assert_same_stroke("M60 60 c0 11.046 -8.954 20 -20 20");
    assert!(optimized.contains('a'), "{}", optimized);
    assert_same_stroke("M100 20 a15 15 0 0 1 15 15 l0 20");
    assert_same_stroke("M70 100 A20 10 30 0 0 110 110");
}
