//! Folding an element's `transform` into its path data
//!
//! A transform can be removed only when nothing else on the element sees
//! the coordinate system it sets up: referenced paint servers, clips and
//! masks would move, an inline style could set a stroke, and a stroke that
//! is not scaled uniformly cannot be expressed by `stroke-width` alone.

use crate::element::Element;
use crate::style::ComputedStyle;
use pathopt_core::{to_fixed, NumericFormatter};
use pathopt_path::transform::{
    compose, parse_transform_list_with_diagnostics, try_apply_to_path, AffineMatrix,
};
use pathopt_path::Command;
use pathopt_settings::PathDataSettings;
use tracing::debug;

/// Attributes that may point at other elements with `url(#id)`
const REFERENCE_ATTRIBUTES: [&str; 10] = [
    "clip-path",
    "color-profile",
    "fill",
    "filter",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "stroke",
    "style",
];

/// Stroke attributes measured in user units
const STROKE_LENGTH_ATTRIBUTES: [&str; 2] = ["stroke-dashoffset", "stroke-dasharray"];

/// Initial value of `stroke-width`
const DEFAULT_STROKE_WIDTH: &str = "1";

/// Apply the element's `transform` to `commands`.
///
/// On success the `transform` attribute is removed, stroke lengths are
/// rescaled, and the transformed commands are returned. `None` leaves the
/// element untouched.
pub fn apply_transforms(
    element: &mut Element,
    style: &ComputedStyle,
    commands: &[Command],
    settings: &PathDataSettings,
) -> Option<Vec<Command>> {
    let text = element.attr("transform").map(str::trim).filter(|t| !t.is_empty())?;

    if element.has_attr("id") || element.has_attr("style") {
        debug!("Keeping transform on <{}> with id or inline style", element.name);
        return None;
    }
    let references = REFERENCE_ATTRIBUTES
        .iter()
        .filter_map(|name| element.attr(name))
        .any(|value| value.contains("url("));
    if references {
        debug!("Keeping transform on <{}> that references other elements", element.name);
        return None;
    }
    if style.stroke_depends_on_context() {
        debug!("Keeping transform on <{}>: stroke depends on context", element.name);
        return None;
    }

    let (list, error) = parse_transform_list_with_diagnostics(text);
    if let Some(err) = error {
        debug!("Keeping unparseable transform {:?}: {}", text, err);
        return None;
    }
    let mut matrix = compose(&list);
    if let Some(precision) = settings.transform_precision {
        matrix = matrix.map(|v| to_fixed(v, precision));
    }

    let stroked = style.may_have_stroke();
    if stroked {
        if !settings.apply_transforms_stroked {
            return None;
        }
        if !matrix.is_similarity() {
            debug!(
                "Keeping transform on stroked <{}>: {:?} does not scale uniformly",
                element.name,
                matrix.to_array()
            );
            return None;
        }
    }

    let transformed = match try_apply_to_path(&matrix, commands) {
        Ok(transformed) => transformed,
        Err(e) => {
            debug!("Keeping transform on <{}>: {}", element.name, e);
            return None;
        }
    };

    if stroked {
        scale_stroke(element, style, &matrix, &settings.formatter());
    }
    element.remove_attr("transform");
    Some(transformed)
}

fn scale_stroke(
    element: &mut Element,
    style: &ComputedStyle,
    matrix: &AffineMatrix,
    formatter: &NumericFormatter,
) {
    let scale = matrix.uniform_scale();
    if scale == 1.0 || element.attr("vector-effect") == Some("non-scaling-stroke") {
        return;
    }

    let width = element
        .attr("stroke-width")
        .or(style.stroke_width.known())
        .unwrap_or(DEFAULT_STROKE_WIDTH)
        .to_string();
    element.set_attr("stroke-width", scale_numbers(&width, scale, formatter));

    for name in STROKE_LENGTH_ATTRIBUTES {
        if let Some(value) = element.attr(name).map(str::to_string) {
            element.set_attr(name, scale_numbers(&value, scale, formatter));
        }
    }
}

/// Multiply every number in `value` by `factor`, keeping units and
/// separators as written.
fn scale_numbers(value: &str, factor: f64, formatter: &NumericFormatter) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while !rest.is_empty() {
        let len = number_prefix_len(rest);
        if len == 0 {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
            continue;
        }
        match rest[..len].parse::<f64>() {
            Ok(number) => out.push_str(&formatter.format_value(number * factor)),
            Err(_) => out.push_str(&rest[..len]),
        }
        rest = &rest[len..];
    }
    out
}

/// Length of the number at the start of `text`, or 0
fn number_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    let mantissa = &bytes[digits_start..i];
    if mantissa.is_empty() || mantissa == b"." {
        return 0;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exponent_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_start {
            i = j;
        }
    }
    i
}
