//! Curve helpers: Bézier evaluation and arc to cubic conversion.

use crate::codec::{Command, Opcode};
use crate::normalize::Cursor;
use pathopt_core::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Point on a cubic Bézier starting at the origin.
///
/// `curve` holds the two control points and the end point relative to the
/// start: `[x1, y1, x2, y2, x, y]`.
pub fn cubic_point(curve: &[f64], t: f64) -> Point {
    let sqr_t = t * t;
    let cub_t = sqr_t * t;
    let mt = 1.0 - t;
    let sqr_mt = mt * mt;
    Point::new(
        3.0 * sqr_mt * t * curve[0] + 3.0 * mt * sqr_t * curve[2] + cub_t * curve[4],
        3.0 * sqr_mt * t * curve[1] + 3.0 * mt * sqr_t * curve[3] + cub_t * curve[5],
    )
}

/// Cubic control points equivalent to a quadratic segment
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> [Point; 3] {
    let c1 = start + (control - start) * (2.0 / 3.0);
    let c2 = end + (control - end) * (2.0 / 3.0);
    [c1, c2, end]
}

fn angle_between(u: Point, v: Point) -> f64 {
    u.cross(v).atan2(u.dot(v))
}

/// Parameters of an elliptical arc in endpoint form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub from: Point,
    pub to: Point,
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Approximate an elliptical arc with cubic Béziers of at most 90° each.
///
/// Each cubic is `[control1, control2, end]` in absolute coordinates.
/// Zero radii give a straight segment, and coincident endpoints give
/// nothing, as renderers draw them.
pub fn arc_to_cubics(arc: &ArcSegment) -> Vec<[Point; 3]> {
    let ArcSegment { from, to, .. } = *arc;
    if from == to {
        return Vec::new();
    }
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return vec![[from, to, to]];
    }

    let phi = arc.rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Start point in the ellipse's frame, relative to the chord midpoint
    let half = (from - to) * 0.5;
    let x1p = cos_phi * half.x + sin_phi * half.y;
    let y1p = -sin_phi * half.x + cos_phi * half.y;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let denom = rx2 * y1p * y1p + ry2 * x1p * x1p;
    if denom.abs() < f64::EPSILON {
        return vec![[from, to, to]];
    }
    let numer = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let mid = (from + to) * 0.5;
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + mid.x,
        sin_phi * cxp + cos_phi * cyp + mid.y,
    );

    let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let mut theta = angle_between(Point::new(1.0, 0.0), u);
    let mut delta = angle_between(u, v);
    if !arc.sweep && delta > 0.0 {
        delta -= TAU;
    } else if arc.sweep && delta < 0.0 {
        delta += TAU;
    }

    let segments = ((delta.abs() / FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
    let step = delta / segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let on_ellipse = |u: f64, v: f64| {
        Point::new(
            center.x + cos_phi * rx * u - sin_phi * ry * v,
            center.y + sin_phi * rx * u + cos_phi * ry * v,
        )
    };

    let mut cubics = Vec::with_capacity(segments);
    for i in 0..segments {
        let t0 = theta;
        let t1 = theta + step;
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();
        let cp1 = on_ellipse(c0 - k * s0, s0 + k * c0);
        let cp2 = on_ellipse(c1 + k * s1, s1 - k * c1);
        // Land exactly on the requested end point
        let end = if i + 1 == segments {
            to
        } else {
            on_ellipse(c1, s1)
        };
        cubics.push([cp1, cp2, end]);
        theta = t1;
    }
    cubics
}

/// Rewrite commands as absolute `M`, `L`, `C` and `Z` only.
///
/// Shorthand curves are expanded using the reflected control point, and arcs
/// are approximated with cubics.
pub fn to_absolute_curves(commands: &[Command]) -> Vec<Command> {
    let mut out = Vec::with_capacity(commands.len());
    let mut cursor = Cursor::default();
    let mut prev_cubic_control: Option<Point> = None;
    let mut prev_quad_control: Option<Point> = None;

    for command in commands {
        let base = cursor.position;
        let origin = if command.relative { base } else { Point::ZERO };
        let a = &command.args;
        let pt = |i: usize| origin + Point::new(a[i], a[i + 1]);
        let mut cubic_control = None;
        let mut quad_control = None;

        match command.opcode {
            Opcode::MoveTo => out.push(Command::absolute(Opcode::MoveTo, &[pt(0).x, pt(0).y])),
            Opcode::LineTo | Opcode::HorizontalLineTo | Opcode::VerticalLineTo => {
                let end = command.end_point(base, cursor.start);
                out.push(Command::absolute(Opcode::LineTo, &[end.x, end.y]));
            }
            Opcode::CurveTo => {
                let (c1, c2, end) = (pt(0), pt(2), pt(4));
                out.push(cubic(c1, c2, end));
                cubic_control = Some(c2);
            }
            Opcode::SmoothCurveTo => {
                let c1 = prev_cubic_control.map_or(base, |c| c.reflect(base));
                let (c2, end) = (pt(0), pt(2));
                out.push(cubic(c1, c2, end));
                cubic_control = Some(c2);
            }
            Opcode::QuadTo => {
                let (control, end) = (pt(0), pt(2));
                let [c1, c2, end] = quad_to_cubic(base, control, end);
                out.push(cubic(c1, c2, end));
                quad_control = Some(control);
            }
            Opcode::SmoothQuadTo => {
                let control = prev_quad_control.map_or(base, |c| c.reflect(base));
                let end = pt(0);
                let [c1, c2, end] = quad_to_cubic(base, control, end);
                out.push(cubic(c1, c2, end));
                quad_control = Some(control);
            }
            Opcode::ArcTo => {
                let arc = ArcSegment {
                    from: base,
                    to: pt(5),
                    rx: a[0],
                    ry: a[1],
                    rotation: a[2],
                    large_arc: a[3] != 0.0,
                    sweep: a[4] != 0.0,
                };
                for [c1, c2, end] in arc_to_cubics(&arc) {
                    out.push(cubic(c1, c2, end));
                }
            }
            Opcode::ClosePath => out.push(Command::absolute(Opcode::ClosePath, &[])),
        }

        prev_cubic_control = cubic_control;
        prev_quad_control = quad_control;
        cursor.advance(command);
    }
    out
}

fn cubic(c1: Point, c2: Point, end: Point) -> Command {
    Command::absolute(Opcode::CurveTo, &[c1.x, c1.y, c2.x, c2.y, end.x, end.y])
}
