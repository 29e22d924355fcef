//! Convex hulls with indexed extreme points

use pathopt_core::{GeometryError, Point};
use std::cmp::Ordering;

/// Convex polygon in counter-clockwise order
///
/// Index 0 is the lowest of the leftmost points. The extreme indices name
/// where support searches start for each quadrant of directions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    pub points: Vec<Point>,
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl ConvexPolygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polygon encloses an area
    pub fn is_solid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Point of the polygon farthest along `direction`.
    ///
    /// Starts at the extreme point of the quadrant `direction` falls in and
    /// walks forward while the projection grows.
    pub fn support(&self, direction: Point) -> Point {
        let n = self.points.len();
        if n == 0 {
            return Point::ZERO;
        }
        let mut index = match (direction.y >= 0.0, direction.x < 0.0) {
            (true, true) => self.max_y,
            (true, false) => self.max_x,
            (false, true) => self.min_x,
            (false, false) => self.min_y,
        };
        let mut best = self.points[index];
        let mut max = best.dot(direction);
        for _ in 1..n {
            index = (index + 1) % n;
            let value = self.points[index].dot(direction);
            if value <= max {
                break;
            }
            max = value;
            best = self.points[index];
        }
        best
    }
}

fn turn(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(b - o)
}

/// Convex hull of `points` by Andrew's monotone chain.
///
/// Collinear points are dropped. Fewer than three distinct points give a
/// polygon that is not [solid](ConvexPolygon::is_solid).
pub fn convex_hull(points: &[Point]) -> ConvexPolygon {
    let mut sorted: Vec<Point> = points.iter().copied().filter(|p| p.is_finite()).collect();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    sorted.dedup();

    if sorted.len() < 3 {
        return with_extremes(sorted);
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Each chain ends where the other starts.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    with_extremes(lower)
}

/// [`convex_hull`], refusing hulls without area.
pub fn try_convex_hull(points: &[Point]) -> Result<ConvexPolygon, GeometryError> {
    let hull = convex_hull(points);
    if hull.is_solid() {
        Ok(hull)
    } else {
        Err(GeometryError::DegenerateHull { points: hull.len() })
    }
}

fn with_extremes(points: Vec<Point>) -> ConvexPolygon {
    let mut hull = ConvexPolygon {
        points,
        min_x: 0,
        max_x: 0,
        min_y: 0,
        max_y: 0,
    };
    for (i, p) in hull.points.iter().enumerate() {
        if p.x < hull.points[hull.min_x].x {
            hull.min_x = i;
        }
        if p.x > hull.points[hull.max_x].x {
            hull.max_x = i;
        }
        if p.y < hull.points[hull.min_y].y {
            hull.min_y = i;
        }
        if p.y > hull.points[hull.max_y].y {
            hull.max_y = i;
        }
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 0.0),
        ]
    }

    #[test]
    fn test_hull_drops_inner_and_collinear_points() {
        let hull = convex_hull(&square());
        assert_eq!(
            hull.points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert_eq!(hull.min_x, 0);
        assert_eq!(hull.max_x, 1);
        assert_eq!(hull.min_y, 0);
        assert_eq!(hull.max_y, 2);
    }

    #[test]
    fn test_support_point() {
        let hull = convex_hull(&square());
        assert_eq!(hull.support(Point::new(1.0, 1.0)), Point::new(10.0, 10.0));
        assert_eq!(hull.support(Point::new(-1.0, 1.0)), Point::new(0.0, 10.0));
        assert_eq!(hull.support(Point::new(-1.0, -1.0)), Point::new(0.0, 0.0));
        assert_eq!(hull.support(Point::new(1.0, -1.0)), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_degenerate_hull() {
        let line = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert!(!convex_hull(&line).is_solid());
        assert_eq!(
            try_convex_hull(&line),
            Err(GeometryError::DegenerateHull { points: 2 })
        );
    }
}
