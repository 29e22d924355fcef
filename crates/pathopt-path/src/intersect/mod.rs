//! Overlap test between two path outlines
//!
//! Each sub-path is bounded by the convex hull of points gathered from its
//! segments, and hulls are compared pairwise with a GJK search. The test
//! is conservative for filled areas: it may report overlap for outlines
//! that only come close. Sub-paths without area are ignored.

pub mod gjk;
pub mod hull;
pub mod points;

pub use gjk::{overlap, Overlap};
pub use hull::{convex_hull, try_convex_hull, ConvexPolygon};
pub use points::{gather_points, PointSet, SubPathPoints};

use crate::codec::Command;
use points::boxes_apart;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Upper bound on GJK iterations for one pair of hulls. Reaching it is
/// reported as an overlap.
pub const GJK_ITERATION_LIMIT: usize = 10_000;

/// Whether the outlines of two programs may overlap.
pub fn intersects(a: &[Command], b: &[Command]) -> bool {
    let points_a = gather_points(a);
    let points_b = gather_points(b);

    if boxes_apart(&points_a.bounds, &points_b.bounds) {
        return false;
    }
    let any_box_overlap = points_a.subpaths.iter().any(|sa| {
        points_b
            .subpaths
            .iter()
            .any(|sb| !boxes_apart(&sa.bounds, &sb.bounds))
    });
    if !any_box_overlap {
        return false;
    }

    let hulls_a = solid_hulls(&points_a);
    let hulls_b = solid_hulls(&points_b);

    hulls_a.iter().any(|ha| {
        hulls_b.iter().any(|hb| {
            // A fixed order per pair keeps the answer independent of
            // argument order.
            let (first, second) = if hull_order(ha, hb) == Ordering::Greater {
                (hb, ha)
            } else {
                (ha, hb)
            };
            match overlap(first, second) {
                Overlap::Disjoint => false,
                Overlap::Overlapping => true,
                Overlap::Undecided => {
                    warn!(
                        "Overlap search hit {} iterations; treating paths as intersecting",
                        GJK_ITERATION_LIMIT
                    );
                    true
                }
            }
        })
    })
}

fn solid_hulls(set: &PointSet) -> Vec<ConvexPolygon> {
    set.subpaths
        .iter()
        .filter_map(|subpath| match try_convex_hull(&subpath.points) {
            Ok(hull) => Some(hull),
            Err(e) => {
                debug!("Skipping sub-path in overlap test: {}", e);
                None
            }
        })
        .collect()
}

fn hull_order(a: &ConvexPolygon, b: &ConvexPolygon) -> Ordering {
    for (p, q) in a.points.iter().zip(&b.points) {
        let ord = p
            .x
            .partial_cmp(&q.x)
            .unwrap_or(Ordering::Equal)
            .then(p.y.partial_cmp(&q.y).unwrap_or(Ordering::Equal));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
