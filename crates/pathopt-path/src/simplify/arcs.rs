//! Circle fitting for cubic curves
//!
//! Curves here are relative cubic data `[x1, y1, x2, y2, x, y]` that start
//! at the origin.

use crate::curves::cubic_point;
use pathopt_core::Point;
use pathopt_settings::ArcSettings;

/// Circle found for a curve, centre relative to the curve's start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Parameters at which a curve is compared with its circle
const ARC_SAMPLES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Radii at or beyond this are treated as straight lines
const MAX_RADIUS: f64 = 1e15;

/// Decides whether cubic curves are close enough to circular arcs
#[derive(Debug, Clone, Copy)]
pub struct ArcFitter {
    threshold: f64,
    tolerance: f64,
    error: f64,
}

impl ArcFitter {
    /// `error` is the rounding error of the output precision.
    pub fn new(settings: &ArcSettings, error: f64) -> Self {
        Self {
            threshold: settings.threshold,
            tolerance: settings.tolerance,
            error,
        }
    }

    /// Allowed distance between the curve and the circle of `radius`:
    /// the smaller of `threshold` rounding errors and `tolerance` percent
    /// of the radius. The smaller bound is intended: an arc accepted here
    /// also passes the looser `max` of the two.
    pub fn tolerance(&self, radius: f64) -> f64 {
        (self.threshold * self.error).min(self.tolerance * radius / 100.0)
    }

    /// Circle through the curve's start, midpoint and end, if the curve
    /// stays on it at t = 1/4 and t = 3/4.
    pub fn find_circle(&self, curve: &[f64]) -> Option<Circle> {
        let mid = cubic_point(curve, 0.5);
        let end = Point::new(curve[4], curve[5]);
        let m1 = mid * 0.5;
        let m2 = (mid + end) * 0.5;
        let center = get_intersection([
            m1.x,
            m1.y,
            m1.x + m1.y,
            m1.y - m1.x,
            m2.x,
            m2.y,
            m2.x + (m2.y - mid.y),
            m2.y - (m2.x - mid.x),
        ])?;
        let radius = center.length();
        if radius >= MAX_RADIUS {
            return None;
        }
        let tolerance = self.tolerance(radius);
        [0.25, 0.75]
            .iter()
            .all(|&t| (cubic_point(curve, t).distance(center) - radius).abs() <= tolerance)
            .then_some(Circle { center, radius })
    }

    /// Whether the curve stays on `circle` at every sample point
    pub fn is_arc(&self, curve: &[f64], circle: &Circle) -> bool {
        let tolerance = self.tolerance(circle.radius);
        ARC_SAMPLES.iter().all(|&t| {
            (cubic_point(curve, t).distance(circle.center) - circle.radius).abs() <= tolerance
        })
    }

    /// [`is_arc`](Self::is_arc) for the curve that ends where `circle`'s
    /// curve starts.
    pub fn is_arc_prev(&self, curve: &[f64], circle: &Circle) -> bool {
        let shifted = Circle {
            center: circle.center + Point::new(curve[4], curve[5]),
            radius: circle.radius,
        };
        self.is_arc(curve, &shifted)
    }
}

/// Intersection of the line through the first two points of `coords` with
/// the line through the last two.
pub fn get_intersection(coords: [f64; 8]) -> Option<Point> {
    let a1 = coords[1] - coords[3];
    let b1 = coords[2] - coords[0];
    let c1 = coords[0] * coords[3] - coords[2] * coords[1];
    let a2 = coords[5] - coords[7];
    let b2 = coords[6] - coords[4];
    let c2 = coords[4] * coords[7] - coords[5] * coords[6];
    let denom = a1 * b2 - a2 * b1;
    if denom == 0.0 {
        return None;
    }
    let cross = Point::new((b1 * c2 - b2 * c1) / denom, (a1 * c2 - a2 * c1) / -denom);
    cross.is_finite().then_some(cross)
}

/// Whether the control polygon of the curve is convex, tested by where its
/// diagonals cross.
pub fn is_convex(data: &[f64]) -> bool {
    let Some(center) = get_intersection([
        0.0, 0.0, data[2], data[3], data[0], data[1], data[4], data[5],
    ]) else {
        return false;
    };
    (data[2] < center.x) == (center.x < 0.0)
        && (data[3] < center.y) == (center.y < 0.0)
        && (data[4] < center.x) == (center.x < data[0])
        && (data[5] < center.y) == (center.y < data[1])
}

/// Angle the curve sweeps around `circle`
pub fn find_arc_angle(curve: &[f64], circle: &Circle) -> f64 {
    let start = -circle.center;
    let end = Point::new(curve[4], curve[5]) - circle.center;
    let cos = start.dot(end) / (start.dot(start) * end.dot(end)).sqrt();
    cos.clamp(-1.0, 1.0).acos()
}
