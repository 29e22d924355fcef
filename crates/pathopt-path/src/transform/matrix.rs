//! Affine matrices and named transforms

use pathopt_core::{cleanup_out_data, OutputFormat, Point};
use serde::{Deserialize, Serialize};

/// 2D affine matrix `[a b c d e f]`
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn from_array(m: [f64; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`, optionally about `center`
    pub fn rotation(degrees: f64, center: Option<(f64, f64)>) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (cx, cy) = center.unwrap_or((0.0, 0.0));
        Self::new(
            cos,
            sin,
            -sin,
            cos,
            (1.0 - cos) * cx + sin * cy,
            (1.0 - cos) * cy - sin * cx,
        )
    }

    pub fn skew_x(degrees: f64) -> Self {
        Self::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Self::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// `self · other`: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &AffineMatrix) -> AffineMatrix {
        AffineMatrix::new(
            self.a * other.a + self.c * other.b,
            self.b * other.a + self.d * other.b,
            self.a * other.c + self.c * other.d,
            self.b * other.c + self.d * other.d,
            self.a * other.e + self.c * other.f + self.e,
            self.b * other.e + self.d * other.f + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn apply_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Apply the linear part only, for offsets between two points
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn has_translation(&self) -> bool {
        self.e != 0.0 || self.f != 0.0
    }

    /// Linear part without the translation
    pub fn linear(&self) -> AffineMatrix {
        AffineMatrix::new(self.a, self.b, self.c, self.d, 0.0, 0.0)
    }

    /// Rotation, uniform scale and optional mirror only
    pub fn is_similarity(&self) -> bool {
        (self.a == self.d && self.b == -self.c) || (self.a == -self.d && self.b == self.c)
    }

    /// Length scale factor of the matrix, `sqrt(|det|)`
    pub fn uniform_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    /// Componentwise comparison with a tolerance relative to the magnitude
    /// of each component.
    pub fn approx_eq(&self, other: &AffineMatrix, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(x, y)| (x - y).abs() <= tolerance * x.abs().max(y.abs()).max(1.0))
    }

    /// Round every component with `round`
    pub fn map(&self, round: impl Fn(f64) -> f64) -> AffineMatrix {
        AffineMatrix::from_array(self.to_array().map(round))
    }
}

/// One function of a transform list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NamedTransform {
    /// `translate(tx [ty])`
    Translate { tx: f64, ty: Option<f64> },
    /// `scale(sx [sy])`
    Scale { sx: f64, sy: Option<f64> },
    /// `rotate(angle [cx cy])`, angle in degrees
    Rotate {
        angle: f64,
        center: Option<(f64, f64)>,
    },
    /// `skewX(angle)`, degrees
    SkewX(f64),
    /// `skewY(angle)`, degrees
    SkewY(f64),
    /// `matrix(a b c d e f)`
    Matrix(AffineMatrix),
}

/// Ordered transform functions, applied right to left to a point
pub type TransformList = Vec<NamedTransform>;

impl NamedTransform {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "translate",
            Self::Scale { .. } => "scale",
            Self::Rotate { .. } => "rotate",
            Self::SkewX(_) => "skewX",
            Self::SkewY(_) => "skewY",
            Self::Matrix(_) => "matrix",
        }
    }

    /// Arguments as written
    pub fn args(&self) -> Vec<f64> {
        match *self {
            Self::Translate { tx, ty } => std::iter::once(tx).chain(ty).collect(),
            Self::Scale { sx, sy } => std::iter::once(sx).chain(sy).collect(),
            Self::Rotate { angle, center } => match center {
                Some((cx, cy)) => vec![angle, cx, cy],
                None => vec![angle],
            },
            Self::SkewX(angle) | Self::SkewY(angle) => vec![angle],
            Self::Matrix(m) => m.to_array().to_vec(),
        }
    }

    pub fn to_matrix(&self) -> AffineMatrix {
        match *self {
            Self::Translate { tx, ty } => AffineMatrix::translation(tx, ty.unwrap_or(0.0)),
            Self::Scale { sx, sy } => AffineMatrix::scaling(sx, sy.unwrap_or(sx)),
            Self::Rotate { angle, center } => AffineMatrix::rotation(angle, center),
            Self::SkewX(angle) => AffineMatrix::skew_x(angle),
            Self::SkewY(angle) => AffineMatrix::skew_y(angle),
            Self::Matrix(m) => m,
        }
    }

    /// Whether this function leaves every point where it is
    pub fn is_identity(&self) -> bool {
        match *self {
            Self::Translate { tx, ty } => tx == 0.0 && ty.unwrap_or(0.0) == 0.0,
            Self::Scale { sx, sy } => sx == 1.0 && sy.unwrap_or(1.0) == 1.0,
            Self::Rotate { angle, .. } => angle == 0.0,
            Self::SkewX(angle) | Self::SkewY(angle) => angle == 0.0,
            Self::Matrix(m) => m.is_identity(),
        }
    }
}

/// Multiply a transform list into one matrix, left to right
pub fn compose(list: &[NamedTransform]) -> AffineMatrix {
    list.iter()
        .fold(AffineMatrix::IDENTITY, |acc, t| acc.multiply(&t.to_matrix()))
}

/// Write a transform list as text, e.g. `translate(5)scale(2)`
///
/// Values are written as stored; round them first.
pub fn serialize_transform_list(list: &[NamedTransform], output: &OutputFormat) -> String {
    list.iter()
        .map(|t| format!("{}({})", t.name(), cleanup_out_data(&t.args(), output, false)))
        .collect()
}
