//! Transform list scanner

use super::matrix::{AffineMatrix, NamedTransform, TransformList};
use crate::codec::parser::read_number;
use pathopt_core::ParseError;

/// Parse a transform list, discarding the reason parsing stopped (if it did).
pub fn parse_transform_list(text: &str) -> TransformList {
    let (list, error) = parse_transform_list_with_diagnostics(text);
    if let Some(err) = error {
        tracing::debug!("transform list truncated: {}", err);
    }
    list
}

/// Parse a transform list and report where and why parsing stopped.
///
/// Every call completed before the error is returned.
pub fn parse_transform_list_with_diagnostics(text: &str) -> (TransformList, Option<ParseError>) {
    let bytes = text.as_bytes();
    let mut list = TransformList::new();
    let mut i = 0;

    loop {
        i = skip_separators(bytes, i, true);
        if i >= bytes.len() {
            return (list, None);
        }
        match read_call(text, i) {
            Ok((transform, next)) => {
                list.push(transform);
                i = next;
            }
            Err(err) => return (list, Some(err)),
        }
    }
}

fn is_wsp(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

fn skip_separators(bytes: &[u8], mut i: usize, commas: bool) -> usize {
    while i < bytes.len() && (is_wsp(bytes[i]) || (commas && bytes[i] == b',')) {
        i += 1;
    }
    i
}

fn char_at(text: &str, i: usize) -> char {
    text.get(i..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or('\u{fffd}')
}

/// Read one `name(args)` call starting at `start`.
fn read_call(text: &str, start: usize) -> Result<(NamedTransform, usize), ParseError> {
    let bytes = text.as_bytes();
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == start {
        return Err(ParseError::UnexpectedCharacter {
            offset: start,
            found: char_at(text, start),
        });
    }
    let name = &text[start..i];

    i = skip_separators(bytes, i, false);
    match bytes.get(i) {
        Some(b'(') => i += 1,
        Some(_) => {
            return Err(ParseError::UnexpectedCharacter {
                offset: i,
                found: char_at(text, i),
            })
        }
        None => {
            return Err(ParseError::Unterminated {
                offset: start,
                name: name.to_string(),
            })
        }
    }

    let mut args: Vec<f64> = Vec::with_capacity(6);
    loop {
        i = skip_separators(bytes, i, true);
        match bytes.get(i) {
            None => {
                return Err(ParseError::Unterminated {
                    offset: start,
                    name: name.to_string(),
                })
            }
            Some(b')') => {
                i += 1;
                break;
            }
            Some(_) => {
                let (value, next) =
                    read_number(bytes, i).ok_or(ParseError::InvalidNumber { offset: i })?;
                args.push(value);
                i = next;
            }
        }
    }

    let transform = build(name, &args).ok_or_else(|| {
        if is_known(name) {
            ParseError::ArgumentCount {
                offset: start,
                name: name.to_string(),
                found: args.len(),
            }
        } else {
            ParseError::UnknownTransform {
                offset: start,
                name: name.to_string(),
            }
        }
    })?;
    Ok((transform, i))
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY"
    )
}

fn build(name: &str, args: &[f64]) -> Option<NamedTransform> {
    let transform = match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => {
            NamedTransform::Matrix(AffineMatrix::new(a, b, c, d, e, f))
        }
        ("translate", &[tx]) => NamedTransform::Translate { tx, ty: None },
        ("translate", &[tx, ty]) => NamedTransform::Translate { tx, ty: Some(ty) },
        ("scale", &[sx]) => NamedTransform::Scale { sx, sy: None },
        ("scale", &[sx, sy]) => NamedTransform::Scale { sx, sy: Some(sy) },
        ("rotate", &[angle]) => NamedTransform::Rotate {
            angle,
            center: None,
        },
        ("rotate", &[angle, cx, cy]) => NamedTransform::Rotate {
            angle,
            center: Some((cx, cy)),
        },
        ("skewX", &[angle]) => NamedTransform::SkewX(angle),
        ("skewY", &[angle]) => NamedTransform::SkewY(angle),
        _ => return None,
    };
    Some(transform)
}
