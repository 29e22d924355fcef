//! The `convertPathData` processor

use crate::apply_transforms::apply_transforms;
use crate::element::Element;
use crate::processor::{ElementOutcome, ElementProcessor};
use crate::style::ComputedStyle;
use pathopt_path::{
    parse_path_with_diagnostics, serialize, simplify_program, Command, PathProgram,
    SimplifyContext,
};
use pathopt_settings::PathDataSettings;
use tracing::debug;

/// Rewrites the `d` attribute of `path` elements into its shortest
/// equivalent, folding in the element's transform where that is safe.
#[derive(Debug, Clone, Default)]
pub struct ConvertPathData {
    settings: PathDataSettings,
}

impl ConvertPathData {
    pub fn new(settings: PathDataSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PathDataSettings {
        &self.settings
    }

    /// Optimize one element.
    pub fn process(&self, element: &mut Element, style: &ComputedStyle) -> ElementOutcome {
        if !element.is("path") {
            return ElementOutcome::Unchanged;
        }
        let Some(d) = element.attr("d").map(str::to_string) else {
            return ElementOutcome::Unchanged;
        };

        let (program, error) = parse_path_with_diagnostics(&d);
        if let Some(err) = error {
            debug!("Path data truncated at {}", err);
        }
        if program.is_empty() {
            return if style.has_markers() {
                ElementOutcome::Unchanged
            } else {
                debug!("Removing <path> without drawable data");
                ElementOutcome::Remove
            };
        }

        let mut transformed = false;
        let program = if self.settings.apply_transforms {
            match apply_transforms(element, style, program.as_slice(), &self.settings) {
                Some(commands) => {
                    transformed = true;
                    PathProgram::from_commands(commands)
                }
                None => program,
            }
        } else {
            program
        };

        let includes_vertices = program.iter().any(|c| !c.is_move());
        let context = SimplifyContext {
            stroke_cap_risk: style.may_show_line_caps(),
            has_marker_mid: style.has_marker_mid(),
        };
        let mut commands = simplify_program(&program, &self.settings, &context);

        // Start and end markers still need somewhere to sit
        if style.has_end_markers() && includes_vertices && commands.iter().all(Command::is_move) {
            commands.push(Command::close());
        }

        let output = serialize(&commands, &self.settings.formatter());
        if output.is_empty() {
            element.remove_attr("d");
            return ElementOutcome::Remove;
        }
        if output != d {
            element.set_attr("d", output);
            ElementOutcome::Rewritten
        } else if transformed {
            ElementOutcome::Rewritten
        } else {
            ElementOutcome::Unchanged
        }
    }
}

impl ElementProcessor for ConvertPathData {
    fn name(&self) -> &str {
        "convertPathData"
    }

    fn description(&self) -> &str {
        "Optimizes path data: writes relative or absolute coordinates, whichever is shorter, \
         removes useless segments and applies transforms"
    }

    fn process(&self, element: &mut Element, style: &ComputedStyle) -> ElementOutcome {
        ConvertPathData::process(self, element, style)
    }
}
