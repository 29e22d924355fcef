//! Fold an affine matrix into path coordinates

use super::matrix::AffineMatrix;
use crate::codec::{Command, Opcode};
use crate::normalize::Cursor;
use pathopt_core::{GeometryError, Point};

/// Rotation beyond which radii are swapped to keep the angle short
const MAX_ARC_ROTATION: f64 = 80.0;

/// Transform every coordinate of `commands` by `matrix`.
///
/// Relative commands stay relative: their offsets go through the linear
/// part only. `H`/`V` become lines since a transformed axis-aligned line is
/// in general no longer axis-aligned.
pub fn apply_to_path(matrix: &AffineMatrix, commands: &[Command]) -> Vec<Command> {
    let mut cursor = Cursor::default();
    let mut out = Vec::with_capacity(commands.len());

    for command in commands {
        let base = cursor.position;
        let mut next = match command.opcode {
            Opcode::HorizontalLineTo => {
                let y = if command.relative { 0.0 } else { base.y };
                Command::new(Opcode::LineTo, command.relative, &[command.args[0], y])
            }
            Opcode::VerticalLineTo => {
                let x = if command.relative { 0.0 } else { base.x };
                Command::new(Opcode::LineTo, command.relative, &[x, command.args[0]])
            }
            _ => command.clone(),
        };

        let map = |p: Point| {
            if command.relative {
                matrix.apply_vector(p)
            } else {
                matrix.apply_point(p)
            }
        };

        if next.opcode == Opcode::ArcTo {
            let origin = if command.relative { Point::ZERO } else { base };
            let chord = Point::new(next.args[5], next.args[6]) - origin;
            transform_arc(matrix, &mut next.args[..5], chord);
            let end = map(Point::new(next.args[5], next.args[6]));
            next.args[5] = end.x;
            next.args[6] = end.y;
        } else {
            for pair in next.args.chunks_exact_mut(2) {
                let p = map(Point::new(pair[0], pair[1]));
                pair[0] = p.x;
                pair[1] = p.y;
            }
        }

        out.push(next);
        cursor.advance(command);
    }
    out
}

/// Like [`apply_to_path`] but refuses a matrix that collapses the plane.
pub fn try_apply_to_path(
    matrix: &AffineMatrix,
    commands: &[Command],
) -> Result<Vec<Command>, GeometryError> {
    let determinant = matrix.determinant();
    if determinant == 0.0 {
        return Err(GeometryError::SingularMatrix { determinant });
    }
    if !matrix.to_array().iter().all(|v| v.is_finite()) {
        return Err(GeometryError::NonFinite {
            context: "transform matrix".to_string(),
        });
    }
    Ok(apply_to_path(matrix, commands))
}

/// Transform the radii, rotation and sweep flag of an arc.
///
/// `arc` holds `[rx, ry, rotation, large_arc, sweep]`; `chord` is the
/// vector from the arc's start to its end before transformation, used to
/// scale up radii too small to span it. Zero radii are left as they are.
pub fn transform_arc(matrix: &AffineMatrix, arc: &mut [f64], chord: Point) {
    if arc[0] == 0.0 || arc[1] == 0.0 {
        if matrix.determinant() < 0.0 {
            arc[4] = 1.0 - arc[4];
        }
        return;
    }

    let mut a = arc[0].abs();
    let mut b = arc[1].abs();
    let (sin, cos) = arc[2].to_radians().sin_cos();

    let h = (chord.x * cos + chord.y * sin).powi(2) / (4.0 * a * a)
        + (chord.y * cos - chord.x * sin).powi(2) / (4.0 * b * b);
    if h > 1.0 {
        let h = h.sqrt();
        a *= h;
        b *= h;
    }

    let ellipse = AffineMatrix::new(a * cos, a * sin, -b * sin, b * cos, 0.0, 0.0);
    let m = matrix.linear().multiply(&ellipse);

    let last_col = m.c * m.c + m.d * m.d;
    let square_sum = m.a * m.a + m.b * m.b + last_col;
    let root = (m.a - m.d).hypot(m.b + m.c) * (m.a + m.d).hypot(m.b - m.c);

    if root == 0.0 {
        // Still a circle
        let r = (square_sum / 2.0).sqrt();
        arc[0] = r;
        arc[1] = r;
        arc[2] = 0.0;
    } else {
        let major_sqr = (square_sum + root) / 2.0;
        let minor_sqr = ((square_sum - root) / 2.0).max(0.0);
        let major = (major_sqr - last_col).abs() > 1e-6;
        let axis_sqr = if major { major_sqr } else { minor_sqr };
        let sub = axis_sqr - last_col;
        let rows_sum = m.a * m.c + m.b * m.d;
        let term1 = m.a * sub + m.c * rows_sum;
        let term2 = m.b * sub + m.d * rows_sum;
        let along = if major { term1 } else { term2 };
        let norm = term1.hypot(term2);
        let cos_angle = if norm == 0.0 {
            1.0
        } else {
            (along / norm).clamp(-1.0, 1.0)
        };
        let negative = if major { term2 < 0.0 } else { term1 > 0.0 };
        let sign = if negative { -1.0 } else { 1.0 };
        arc[0] = major_sqr.sqrt();
        arc[1] = minor_sqr.sqrt();
        arc[2] = sign * cos_angle.acos().to_degrees();
    }

    if matrix.determinant() < 0.0 {
        arc[4] = 1.0 - arc[4];
    }

    if arc[2].abs() > MAX_ARC_ROTATION {
        arc.swap(0, 1);
        arc[2] += if arc[2] > 0.0 { -90.0 } else { 90.0 };
    }
}
