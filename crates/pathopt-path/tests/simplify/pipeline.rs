use pathopt_path::codec::{parse_path, serialize};
use pathopt_path::{simplify_program, SimplifyContext};
use pathopt_settings::PathDataSettings;

fn run(d: &str, settings: &PathDataSettings, context: &SimplifyContext) -> String {
    let commands = simplify_program(&parse_path(d), settings, context);
    serialize(&commands, &settings.formatter())
}

fn simplify(d: &str) -> String {
    run(d, &PathDataSettings::default(), &SimplifyContext::default())
}

#[test]
fn test_rectangle() {
    assert_eq!(simplify("M5,5 L15,5 L15,15 L5,15 Z"), "M5,5h10v10h-10z");
}

#[test]
fn test_smooth_cubic_shorthand() {
    assert_eq!(
        simplify("M0 0 C10 0 20 10 20 20 C20 30 30 40 40 40"),
        "M0,0c10,0,20,10,20,20s10,20,20,20"
    );
}

#[test]
fn test_smooth_quadratic_shorthand() {
    assert_eq!(simplify("M5 5 Q10 0 15 5 Q20 10 25 5"), "M5,5q5-5,10,0t10,0");
}

#[test]
fn test_straight_curve_becomes_line() {
    assert_eq!(simplify("M0 0 C5 0 10 0 20 0"), "M0,0h20");
}

#[test]
fn test_rounding_error_does_not_accumulate() {
    // Each rounded offset absorbs the error of the previous one.
    let settings = PathDataSettings {
        collapse_repeated: false,
        ..PathDataSettings::default()
    };
    assert_eq!(
        run(
            "M0 0 L1.0004 0 L2.0008 0 L3.0012 0 L4.0016 0",
            &settings,
            &SimplifyContext::default()
        ),
        "M0,0h1,1,1.001,1"
    );
}

#[test]
fn test_zero_length_smooth_after_curve_kept() {
    // The reflected control point pulls the segment out and back
    assert_eq!(
        simplify("M40 10 c40 0 40 40 0 40 s0 0 0 0"),
        "M40,10c40,0,40,40,0,40s0,0,0,0"
    );
    assert_eq!(simplify("M10 10 q10 -10 20 0 t0 0"), "M10,10q10-10,20,0t0,0");
}

#[test]
fn test_zero_length_smooth_without_curve_dropped() {
    assert_eq!(simplify("M0 0 s0 0 0 0 l10 0"), "M0,0h10");
}

#[test]
fn test_repeated_close_dropped() {
    assert_eq!(simplify("M0 0 L10 0 L10 10 Z Z"), "M0,0h10v10z");
}

#[test]
fn test_marker_mid_keeps_vertices() {
    let context = SimplifyContext {
        has_marker_mid: true,
        ..SimplifyContext::default()
    };
    assert_eq!(
        run("M0 0 H10 H20", &PathDataSettings::default(), &context),
        "M0,0h10,10"
    );
    assert_eq!(simplify("M0 0 H10 H20"), "M0,0h20");
}

#[test]
fn test_precision_disabled_keeps_values() {
    let settings = PathDataSettings {
        float_precision: None,
        ..PathDataSettings::default()
    };
    assert_eq!(
        run("M0 0 L1.23456789 0", &settings, &SimplifyContext::default()),
        "M0,0h1.23456789"
    );
}

#[test]
fn test_simplifying_twice_changes_nothing() {
    for d in [
        "M10 10 L20 10 L20 20 L10 20 Z",
        "M0 0 C10 0 20 10 20 20 C20 30 30 40 40 40",
        "M5 5 Q10 0 15 5 T25 5",
        "M0 0 C2.209139 0 4 1.790861 4 4",
        "M1.23456 7.891011 l3.3333 -4.4444 h0.0001 v5 z m10 10 l0 0",
    ] {
        let once = simplify(d);
        let twice = simplify(&once);
        assert_eq!(once, twice, "{}", d);
    }
}
