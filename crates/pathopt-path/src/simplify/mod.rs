//! Lossless path simplification
//!
//! [`simplify_program`] rewrites a program into the shortest form this
//! crate knows that renders the same: relative coordinates rounded with
//! error compensation, curves replaced by arcs or lines where they fit,
//! shorthand commands, merged repeats, dropped no-ops and, optionally, a
//! per-command choice of absolute coordinates.

pub mod arcs;
mod filters;
mod mixed;

use crate::codec::{Command, PathProgram};
use crate::normalize::to_relative;
use pathopt_settings::PathDataSettings;

/// Facts about the element being simplified that change what is safe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyContext {
    /// The element may draw a stroke with round or square caps, so
    /// zero-length segments are visible and must be kept.
    pub stroke_cap_risk: bool,
    /// The element carries `marker-mid`, so every vertex is visible and
    /// repeated commands must not be merged.
    pub has_marker_mid: bool,
}

/// Simplify `program` under `settings`.
pub fn simplify_program(
    program: &PathProgram,
    settings: &PathDataSettings,
    context: &SimplifyContext,
) -> Vec<Command> {
    if program.is_empty() {
        return Vec::new();
    }
    let formatter = settings.formatter();
    let relative = to_relative(program.as_slice());
    let filtered = filters::filter_commands(relative, settings, context, &formatter);

    tracing::debug!(
        "simplified {} commands to {}",
        program.len(),
        filtered.len()
    );

    if settings.utilize_absolute || settings.force_absolute_path {
        mixed::convert_to_mixed(filtered, settings, &formatter)
    } else {
        filtered
    }
}
