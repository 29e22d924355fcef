//! Shortest-text rewriting of transform lists
//!
//! Collapses, decomposes, rounds and abbreviates a parsed transform list
//! according to [`TransformSettings`]. The caller writes the result back
//! with [`serialize_transform_list`]; an empty result means the attribute
//! can be dropped.

use super::decompose::decompose;
use super::matrix::{compose, serialize_transform_list, NamedTransform, TransformList};
use pathopt_core::{format_number, NumericFormatter, OutputFormat};
use pathopt_settings::TransformSettings;

/// Rounding used for each kind of transform argument
#[derive(Debug, Clone, Copy)]
struct Precisions {
    /// Translations, rotation centres and matrix `e`/`f`
    float: NumericFormatter,
    /// Scale factors and matrix `a`–`d`
    transform: NumericFormatter,
    /// Rotation and skew angles
    angle: NumericFormatter,
}

impl Precisions {
    /// Derive precisions for `list`.
    ///
    /// Matrix coefficients written with few decimals lower the transform
    /// precision to match, and, when no angle precision is configured, the
    /// number of significant digits they carry bounds the angle precision.
    fn for_list(list: &[NamedTransform], settings: &TransformSettings) -> Self {
        let coefficients: Vec<f64> = list
            .iter()
            .filter_map(|t| match t {
                NamedTransform::Matrix(m) => Some([m.a, m.b, m.c, m.d]),
                _ => None,
            })
            .flatten()
            .collect();

        let mut transform = settings.transform_precision;
        let mut angle = settings.angle_precision();

        if !coefficients.is_empty() {
            let digits = coefficients.iter().map(|&v| float_digits(v)).max().unwrap_or(0);
            if digits > 0 {
                transform = transform.map(|p| p.min(digits));
            }
            if settings.deg_precision.is_none() {
                let significant = coefficients
                    .iter()
                    .map(|&v| significant_digits(v))
                    .max()
                    .unwrap_or(0);
                angle = settings
                    .float_precision
                    .map(|p| p.min(significant.saturating_sub(2)));
            }
        }

        Self {
            float: NumericFormatter::new(settings.float_precision),
            transform: NumericFormatter::new(transform),
            angle: NumericFormatter::new(angle),
        }
    }

    fn round(&self, transform: NamedTransform) -> NamedTransform {
        let float = |v: f64| self.float.round(v);
        match transform {
            NamedTransform::Translate { tx, ty } => NamedTransform::Translate {
                tx: float(tx),
                ty: ty.map(float),
            },
            NamedTransform::Scale { sx, sy } => NamedTransform::Scale {
                sx: self.transform.round(sx),
                sy: sy.map(|v| self.transform.round(v)),
            },
            NamedTransform::Rotate { angle, center } => NamedTransform::Rotate {
                angle: self.angle.round(angle),
                center: center.map(|(cx, cy)| (float(cx), float(cy))),
            },
            NamedTransform::SkewX(angle) => NamedTransform::SkewX(self.angle.round(angle)),
            NamedTransform::SkewY(angle) => NamedTransform::SkewY(self.angle.round(angle)),
            NamedTransform::Matrix(m) => {
                let mut rounded = m.map(|v| self.transform.round(v));
                rounded.e = float(m.e);
                rounded.f = float(m.f);
                NamedTransform::Matrix(rounded)
            }
        }
    }
}

/// Decimal places in the shortest rendering of `value`
fn float_digits(value: f64) -> u8 {
    let text = format_number(value);
    text.split_once('.')
        .map_or(0, |(_, decimals)| decimals.len().min(u8::MAX as usize) as u8)
}

/// Decimal digits in the shortest rendering of `value`
fn significant_digits(value: f64) -> u8 {
    let count = format_number(value).bytes().filter(u8::is_ascii_digit).count();
    count.min(u8::MAX as usize) as u8
}

/// Rewrite `list` into its shortest equivalent under `settings`.
pub fn optimize_transform_list(
    list: &[NamedTransform],
    settings: &TransformSettings,
) -> TransformList {
    let precisions = Precisions::for_list(list, settings);

    let mut data: TransformList = if settings.collapse_into_one && list.len() > 1 {
        vec![NamedTransform::Matrix(compose(list))]
    } else {
        list.to_vec()
    };

    data = if settings.convert_to_shorts {
        convert_to_shorts(data, settings, &precisions)
    } else {
        data.into_iter().map(|t| precisions.round(t)).collect()
    };

    if settings.remove_useless {
        data.retain(|t| !t.is_identity());
    }
    data
}

fn convert_to_shorts(
    data: TransformList,
    settings: &TransformSettings,
    precisions: &Precisions,
) -> TransformList {
    let output = settings.output_format();
    let mut out = TransformList::with_capacity(data.len());

    for transform in data {
        let expanded = match transform {
            NamedTransform::Matrix(m) if settings.matrix_to_transform => {
                let named: TransformList = decompose(&m)
                    .into_iter()
                    .map(|t| precisions.round(t))
                    .collect();
                let original = [precisions.round(transform)];
                if text_len(&named, &output) <= text_len(&original, &output) {
                    named
                } else {
                    original.to_vec()
                }
            }
            other => vec![other],
        };

        for transform in expanded {
            out.push(shorten(precisions.round(transform), settings));
            if settings.short_rotate {
                fold_rotation_center(&mut out);
            }
        }
    }
    out
}

fn text_len(list: &[NamedTransform], output: &OutputFormat) -> usize {
    serialize_transform_list(list, output).len()
}

/// Drop arguments that repeat the default
fn shorten(transform: NamedTransform, settings: &TransformSettings) -> NamedTransform {
    match transform {
        NamedTransform::Translate { tx, ty: Some(ty) } if settings.short_translate && ty == 0.0 => {
            NamedTransform::Translate { tx, ty: None }
        }
        NamedTransform::Scale { sx, sy: Some(sy) } if settings.short_scale && sx == sy => {
            NamedTransform::Scale { sx, sy: None }
        }
        other => other,
    }
}

/// `translate(cx cy)rotate(a)translate(-cx -cy)` at the end of `out`
/// becomes `rotate(a cx cy)`.
fn fold_rotation_center(out: &mut TransformList) {
    let n = out.len();
    if n < 3 {
        return;
    }
    let folded = match (out[n - 3], out[n - 2], out[n - 1]) {
        (
            NamedTransform::Translate { tx: x1, ty: y1 },
            NamedTransform::Rotate {
                angle,
                center: None,
            },
            NamedTransform::Translate { tx: x2, ty: y2 },
        ) => {
            let (y1, y2) = (y1.unwrap_or(0.0), y2.unwrap_or(0.0));
            (x1 == -x2 && y1 == -y2).then_some(NamedTransform::Rotate {
                angle,
                center: Some((x1, y1)),
            })
        }
        _ => None,
    };
    if let Some(rotate) = folded {
        out.truncate(n - 3);
        out.push(rotate);
    }
}
