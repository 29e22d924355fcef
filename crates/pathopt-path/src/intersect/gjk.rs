//! Gilbert-Johnson-Keerthi overlap test for two convex polygons
//!
//! The polygons overlap when their Minkowski difference contains the
//! origin. The search keeps a simplex of at most three support points of
//! the difference and a direction pointing from the simplex to the origin.

use super::hull::ConvexPolygon;
use super::GJK_ITERATION_LIMIT;
use pathopt_core::Point;
use smallvec::SmallVec;

type Simplex = SmallVec<[Point; 3]>;

/// Outcome of a bounded search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    Disjoint,
    Overlapping,
    /// The iteration cap was reached before the search settled.
    Undecided,
}

/// Support point of `a - b` along `direction`
fn support(a: &ConvexPolygon, b: &ConvexPolygon, direction: Point) -> Point {
    a.support(direction) - b.support(-direction)
}

/// Perpendicular of `v` on the side away from `from`
fn facing_away(v: Point, from: Point) -> Point {
    let o = v.perpendicular();
    if o.dot(-from) < 0.0 {
        -o
    } else {
        o
    }
}

/// Search for the origin in the Minkowski difference `a - b`.
pub fn overlap(a: &ConvexPolygon, b: &ConvexPolygon) -> Overlap {
    let mut simplex = Simplex::new();
    simplex.push(support(a, b, Point::new(1.0, 0.0)));
    let mut direction = -simplex[0];

    for _ in 0..GJK_ITERATION_LIMIT {
        let next = support(a, b, direction);
        simplex.push(next);
        if direction.dot(next) <= 0.0 {
            return Overlap::Disjoint;
        }
        if process_simplex(&mut simplex, &mut direction) {
            return Overlap::Overlapping;
        }
    }
    Overlap::Undecided
}

/// Reduce the simplex to the feature nearest the origin and aim the next
/// search at it. Returns `true` once the triangle encloses the origin.
fn process_simplex(simplex: &mut Simplex, direction: &mut Point) -> bool {
    if simplex.len() == 2 {
        let a = simplex[1];
        let b = simplex[0];
        let ao = -a;
        let ab = b - a;
        if ao.dot(ab) > 0.0 {
            *direction = facing_away(ab, a);
        } else {
            *direction = ao;
            simplex.remove(0);
        }
        return false;
    }

    let a = simplex[2];
    let b = simplex[1];
    let c = simplex[0];
    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    // Normals of AB and AC facing away from the third vertex
    let acb = facing_away(ab, ac);
    let abc = facing_away(ac, ab);

    if acb.dot(ao) > 0.0 {
        if ab.dot(ao) > 0.0 {
            *direction = acb;
            simplex.remove(0);
        } else {
            *direction = ao;
            simplex.drain(..2);
        }
    } else if abc.dot(ao) > 0.0 {
        if ac.dot(ao) > 0.0 {
            *direction = abc;
            simplex.remove(1);
        } else {
            *direction = ao;
            simplex.drain(..2);
        }
    } else {
        return true;
    }
    false
}
