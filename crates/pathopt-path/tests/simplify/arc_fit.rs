use pathopt_core::Point;
use pathopt_path::codec::{parse_path, Command, Opcode};
use pathopt_path::curves::cubic_point;
use pathopt_path::simplify::arcs::ArcFitter;
use pathopt_path::{simplify_program, SimplifyContext};
use pathopt_settings::PathDataSettings;
use proptest::prelude::*;

/// Quarter circle of radius 4 from the origin to (4, 4), centre (0, 4)
const QUARTER: [f64; 6] = [2.209139, 0.0, 4.0, 1.790861, 4.0, 4.0];

/// Cubic approximation of the circle arc of `radius` that starts at the
/// origin with polar angle `start` around its centre and sweeps `sweep`
/// radians. The end point is rounded to three decimals and `wobble`
/// shifts the control points.
fn circle_curve(radius: f64, start: f64, sweep: f64, wobble: [f64; 4]) -> [f64; 6] {
    let center = Point::new(-radius * start.cos(), -radius * start.sin());
    let stop = start + sweep;
    let end = Point::new(
        ((center.x + radius * stop.cos()) * 1000.0).round() / 1000.0,
        ((center.y + radius * stop.sin()) * 1000.0).round() / 1000.0,
    );
    let k = 4.0 / 3.0 * (sweep / 4.0).tan() * radius;
    [
        -k * start.sin() + wobble[0],
        k * start.cos() + wobble[1],
        end.x + k * stop.sin() + wobble[2],
        end.y - k * stop.cos() + wobble[3],
        end.x,
        end.y,
    ]
}

/// Centre of a relative arc that starts at the origin
fn arc_center(arc: &Command) -> Point {
    let r = arc.args[0];
    let end = Point::new(arc.args[5], arc.args[6]);
    let half = end.length() / 2.0;
    let offset = (r * r - half * half).max(0.0).sqrt();
    let left = end.perpendicular() * (1.0 / end.length());
    let large = arc.args[3] != 0.0;
    let sweep = arc.args[4] != 0.0;
    let side = if large != sweep { 1.0 } else { -1.0 };
    end * 0.5 + left * (offset * side)
}

fn simplify(curve: &[f64; 6]) -> Vec<Command> {
    let d = format!(
        "M0 0 c{} {} {} {} {} {}",
        curve[0], curve[1], curve[2], curve[3], curve[4], curve[5]
    );
    simplify_program(
        &parse_path(&d),
        &PathDataSettings::default(),
        &SimplifyContext::default(),
    )
}

/// Every sample of `curve` lies on the arc's circle within the fitting
/// tolerance plus the rounding error of the arc's radius.
fn assert_sound(curve: &[f64; 6], arc: &Command) {
    let settings = PathDataSettings::default();
    let formatter = settings.formatter();
    let fitter = ArcFitter::new(&settings.arc_fitting, formatter.error());
    let radius = arc.args[0];
    let center = arc_center(arc);
    let slack = fitter.tolerance(radius) + formatter.error();
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let deviation = (cubic_point(curve, t).distance(center) - radius).abs();
        assert!(deviation <= slack, "t = {}: {} > {}", t, deviation, slack);
    }
}

#[test]
fn test_quarter_circle_becomes_sound_arc() {
    let out = simplify(&QUARTER);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].opcode, Opcode::ArcTo);
    assert_eq!(out[1].args[0], 4.0);
    assert_eq!(out[1].args[4], 1.0);
    assert_sound(&QUARTER, &out[1]);
}

proptest! {
    #[test]
    fn test_fitted_arcs_are_sound(
        radius in 1.0..200.0f64,
        start in 0.0..360.0f64,
        sweep in 5.0..=90.0f64,
        clockwise in any::<bool>(),
        wobble in prop::array::uniform4(-0.002..0.002f64),
    ) {
        let sweep = if clockwise { -sweep } else { sweep };
        let curve = circle_curve(radius, start.to_radians(), sweep.to_radians(), wobble);
        let out = simplify(&curve);
        if let Some(arc) = out.iter().find(|c| c.opcode == Opcode::ArcTo) {
            prop_assert_eq!(arc.args[3], 0.0);
            assert_sound(&curve, arc);
        }
    }
}

#[test]
fn test_generated_quarter_matches_known_curve() {
    let quarter = std::f64::consts::FRAC_PI_2;
    let curve = circle_curve(4.0, -quarter, quarter, [0.0; 4]);
    for (got, want) in curve.iter().zip(QUARTER) {
        assert!((got - want).abs() < 1e-5, "{} != {}", got, want);
    }
}
