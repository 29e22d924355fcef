//! Number rounding and compact rendering
//!
//! Every number written back into path data or a transform list goes through
//! this module: values are rounded to a fixed number of decimals, rendered in
//! their shortest decimal form and joined with the fewest separators a parser
//! still reads unambiguously.

use serde::{Deserialize, Serialize};

/// Tolerance used when rounding is disabled.
pub const UNROUNDED_ERROR: f64 = 1e-2;

/// Decimal places beyond which `f64` scaling loses exactness.
const MAX_FIXED_PRECISION: u8 = 15;

/// Round to `precision` decimals, half away from zero.
pub fn to_fixed(value: f64, precision: u8) -> f64 {
    if precision > MAX_FIXED_PRECISION || !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(i32::from(precision));
    (value * scale).round() / scale
}

/// Round to `precision` decimals, dropping one more decimal when the result
/// stays within half a unit of the last kept decimal.
///
/// `strong_round(2.3481, 3)` gives `2.348` but `strong_round(2.3491, 3)`
/// gives `2.35`.
pub fn strong_round(value: f64, precision: u8) -> f64 {
    if precision == 0 {
        return value.round();
    }
    let fixed = to_fixed(value, precision);
    if fixed == value {
        return value;
    }
    let error = to_fixed(10f64.powi(-i32::from(precision)), precision);
    let rounded = to_fixed(value, precision - 1);
    if to_fixed((rounded - value).abs(), precision + 1) >= error {
        fixed
    } else {
        rounded
    }
}

/// Render a number in its shortest decimal form. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Render a number without the leading zero of a pure fraction.
///
/// `0.5` becomes `.5` and `-0.5` becomes `-.5`.
pub fn remove_leading_zero(value: f64) -> String {
    let text = format_number(value);
    if value > 0.0 && value < 1.0 {
        if let Some(stripped) = text.strip_prefix('0') {
            return stripped.to_string();
        }
    } else if value < 0.0 && value > -1.0 {
        if let Some(stripped) = text.strip_prefix("-0") {
            return format!("-{}", stripped);
        }
    }
    text
}

/// Separator compaction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormat {
    /// Write `.5` instead of `0.5`
    pub remove_leading_zero: bool,
    /// Drop the separator before a negative number, and before a `.5`-style
    /// number that follows a fractional one
    pub negative_extra_space: bool,
    /// Drop the separators around the two arc flags (`a5,5,0,013,4`)
    pub compact_arc_flags: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            remove_leading_zero: true,
            negative_extra_space: true,
            compact_arc_flags: false,
        }
    }
}

/// Join numbers with the shortest unambiguous separators.
///
/// `arc` marks the data as arc arguments (seven per segment) so that flag
/// positions can be compacted when `compact_arc_flags` is set.
pub fn cleanup_out_data(data: &[f64], format: &OutputFormat, arc: bool) -> String {
    let mut out = String::new();
    let mut prev: Option<f64> = None;

    for (i, &raw) in data.iter().enumerate() {
        let item = if raw == 0.0 { 0.0 } else { raw };
        let mut delimiter = if i == 0 { "" } else { "," };

        if arc && format.compact_arc_flags {
            let pos = i % 7;
            if pos == 4 || pos == 5 {
                delimiter = "";
            }
        }

        let text = if format.remove_leading_zero {
            remove_leading_zero(item)
        } else {
            format_number(item)
        };

        if format.negative_extra_space && !delimiter.is_empty() {
            let prev_fractional = prev.is_some_and(|p| p % 1.0 != 0.0);
            if item < 0.0 || (text.starts_with('.') && prev_fractional) {
                delimiter = "";
            }
        }

        prev = Some(item);
        out.push_str(delimiter);
        out.push_str(&text);
    }

    out
}

/// Rounds and renders numbers for one output attribute
///
/// `precision` of `None` disables rounding entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericFormatter {
    /// Decimal places kept, or `None` to keep full precision
    pub precision: Option<u8>,
    /// Separator compaction options
    pub output: OutputFormat,
}

impl NumericFormatter {
    /// Create a formatter with default output options
    pub fn new(precision: Option<u8>) -> Self {
        Self {
            precision,
            output: OutputFormat::default(),
        }
    }

    /// Replace the output options
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Smallest difference the configured precision distinguishes
    pub fn error(&self) -> f64 {
        match self.precision {
            Some(p) => to_fixed(10f64.powi(-i32::from(p)), p),
            None => UNROUNDED_ERROR,
        }
    }

    /// Round one value
    pub fn round(&self, value: f64) -> f64 {
        match self.precision {
            None => value,
            Some(0) => value.round(),
            Some(p) => strong_round(value, p),
        }
    }

    /// Round a copy of `data` and join it with compact separators
    pub fn format(&self, data: &[f64], arc: bool) -> String {
        let rounded: Vec<f64> = data.iter().map(|&v| self.round(v)).collect();
        cleanup_out_data(&rounded, &self.output, arc)
    }

    /// Round and render a single number
    pub fn format_value(&self, value: f64) -> String {
        let value = self.round(value);
        if self.output.remove_leading_zero {
            remove_leading_zero(value)
        } else {
            format_number(value)
        }
    }
}
