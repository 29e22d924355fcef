//! Matrix to named transform decomposition

use super::matrix::{compose, AffineMatrix, NamedTransform, TransformList};

/// Relative tolerance the decomposition must recompose within
const RECOMPOSE_TOLERANCE: f64 = 1e-9;

/// Express `matrix` as a list of named transforms.
///
/// Produces, in order, an optional `translate`, then either
/// `skewX`/`skewY` + `scale` for matrices with one zero off-diagonal term,
/// `scale` + `rotate` when the rows are orthogonal, or `rotate` + `skewX` +
/// `scale` in general. A rotation directly after the translation takes the
/// translation over as its centre. Identity parts are left out, so the
/// identity matrix decomposes to an empty list.
///
/// Values are not rounded. Singular matrices, and any decomposition that
/// does not multiply back to `matrix`, give `[matrix]` unchanged.
pub fn decompose(matrix: &AffineMatrix) -> TransformList {
    let fallback = || vec![NamedTransform::Matrix(*matrix)];

    let determinant = matrix.determinant();
    if determinant == 0.0 || !matrix.to_array().iter().all(|v| v.is_finite()) {
        tracing::debug!("keeping singular matrix {:?}", matrix.to_array());
        return fallback();
    }

    let candidate = decompose_unchecked(matrix, determinant);
    if compose(&candidate).approx_eq(matrix, RECOMPOSE_TOLERANCE) {
        candidate
    } else {
        tracing::debug!("decomposition of {:?} does not recompose", matrix.to_array());
        fallback()
    }
}

fn scale(sx: f64, sy: f64) -> Option<NamedTransform> {
    if sx == 1.0 && sy == 1.0 {
        return None;
    }
    Some(NamedTransform::Scale {
        sx,
        sy: (sx != sy).then_some(sy),
    })
}

fn decompose_unchecked(m: &AffineMatrix, determinant: f64) -> TransformList {
    let AffineMatrix { a, b, c, d, e, f } = *m;
    let translate = m.has_translation().then_some(NamedTransform::Translate {
        tx: e,
        ty: (f != 0.0).then_some(f),
    });

    let mut list = TransformList::new();

    if b == 0.0 && c == 0.0 {
        list.extend(translate);
        list.extend(scale(a, d));
        return list;
    }
    if b == 0.0 {
        // [sx, 0, tan(k)·sy, sy]
        list.extend(translate);
        list.push(NamedTransform::SkewX((c / d).atan().to_degrees()));
        list.extend(scale(a, d));
        return list;
    }
    if c == 0.0 {
        // [sx, tan(k)·sx, 0, sy]
        list.extend(translate);
        list.push(NamedTransform::SkewY((b / a).atan().to_degrees()));
        list.extend(scale(a, d));
        return list;
    }

    let cols_sum = a * c + b * d;
    let rows_sum = a * b + c * d;

    if rows_sum == 0.0 && cols_sum != 0.0 {
        // scale(sx, sy)·rotate(θ): [sx·cos, sy·sin, -sx·sin, sy·cos]
        let sx = a.hypot(c);
        let sy = determinant / sx;
        let angle = (b / sy).atan2(a / sx).to_degrees();
        list.extend(translate);
        list.extend(scale(sx, sy));
        if angle != 0.0 {
            list.push(NamedTransform::Rotate {
                angle,
                center: None,
            });
        }
        return list;
    }

    // rotate(θ)·skewX(k)·scale(sx, sy)
    let sx = a.hypot(b);
    let sy = determinant / sx;
    let theta = b.atan2(a);
    let angle = theta.to_degrees();
    let skew = (cols_sum / (sx * sy)).atan().to_degrees();

    if angle != 0.0 {
        let center = translate.map(|_| rotation_center(theta, e, f));
        if center.is_none() {
            list.extend(translate);
        }
        list.push(NamedTransform::Rotate { angle, center });
    } else {
        list.extend(translate);
    }
    if skew != 0.0 {
        list.push(NamedTransform::SkewX(skew));
    }
    list.extend(scale(sx, sy));
    list
}

/// Centre `c` of the rotation by `theta` whose translation part is `(e, f)`,
/// i.e. the solution of `(I - R)·c = (e, f)`.
fn rotation_center(theta: f64, e: f64, f: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    let p = 1.0 - cos;
    let denom = p * p + sin * sin;
    ((p * e - sin * f) / denom, (sin * e + p * f) / denom)
}
