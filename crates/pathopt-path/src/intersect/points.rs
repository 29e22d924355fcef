//! Point sets that bound each sub-path's outline

use crate::codec::{Command, Opcode};
use crate::curves::to_absolute_curves;
use pathopt_core::{BoundingBox, Point};

/// Points whose convex hull contains one sub-path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPathPoints {
    pub points: Vec<Point>,
    pub bounds: BoundingBox,
}

impl SubPathPoints {
    fn push(&mut self, point: Point) {
        self.bounds.include(point);
        self.points.push(point);
    }
}

/// Bounding points of every sub-path of a program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub subpaths: Vec<SubPathPoints>,
    pub bounds: BoundingBox,
}

/// Collect, per sub-path, points whose convex hull contains the outline.
///
/// Lines contribute their endpoints. Every curve is taken as a cubic
/// (quadratics elevated, shorthands expanded, arcs approximated) and
/// contributes the midpoints of its control polygon and its endpoint,
/// which bound the curve by one de Casteljau split.
pub fn gather_points(commands: &[Command]) -> PointSet {
    let mut set = PointSet::default();
    let mut cursor = Point::ZERO;

    for command in to_absolute_curves(commands) {
        let args = &command.args;
        match command.opcode {
            Opcode::MoveTo => {
                cursor = Point::new(args[0], args[1]);
                let mut subpath = SubPathPoints::default();
                subpath.push(cursor);
                set.subpaths.push(subpath);
            }
            Opcode::LineTo => {
                cursor = Point::new(args[0], args[1]);
                if let Some(subpath) = set.subpaths.last_mut() {
                    subpath.push(cursor);
                }
            }
            Opcode::CurveTo => {
                let c1 = Point::new(args[0], args[1]);
                let c2 = Point::new(args[2], args[3]);
                let end = Point::new(args[4], args[5]);
                if let Some(subpath) = set.subpaths.last_mut() {
                    subpath.push((cursor + c1) * 0.5);
                    subpath.push((c1 + c2) * 0.5);
                    subpath.push((c2 + end) * 0.5);
                    subpath.push(end);
                }
                cursor = end;
            }
            // The sub-path start is already in the set.
            _ => {}
        }
    }

    for subpath in &set.subpaths {
        for &point in &subpath.points {
            set.bounds.include(point);
        }
    }
    set
}

/// Whether two boxes are apart. Boxes that only touch are apart.
pub(crate) fn boxes_apart(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.is_empty()
        || b.is_empty()
        || a.max_x <= b.min_x
        || b.max_x <= a.min_x
        || a.max_y <= b.min_y
        || b.max_y <= a.min_y
}
