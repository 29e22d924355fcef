//! The `convertTransform` processor

use crate::element::Element;
use crate::processor::{ElementOutcome, ElementProcessor};
use crate::style::ComputedStyle;
use pathopt_path::transform::parse_transform_list_with_diagnostics;
use pathopt_path::{optimize_transform_list, serialize_transform_list};
use pathopt_settings::TransformSettings;
use tracing::debug;

/// Attributes holding a transform list
pub const TRANSFORM_ATTRIBUTES: [&str; 3] = ["transform", "gradientTransform", "patternTransform"];

/// Rewrites transform lists into their shortest form
#[derive(Debug, Clone, Default)]
pub struct ConvertTransform {
    settings: TransformSettings,
}

impl ConvertTransform {
    pub fn new(settings: TransformSettings) -> Self {
        Self { settings }
    }

    /// Shortest text for `text`, or `None` when it does not parse.
    /// An empty string means the list is an identity.
    pub fn convert(&self, text: &str) -> Option<String> {
        let (list, error) = parse_transform_list_with_diagnostics(text);
        if let Some(err) = error {
            debug!("Keeping transform {:?}: {}", text, err);
            return None;
        }
        let optimized = optimize_transform_list(&list, &self.settings);
        Some(serialize_transform_list(&optimized, &self.settings.output_format()))
    }

    pub fn process(&self, element: &mut Element) -> ElementOutcome {
        let mut outcome = ElementOutcome::Unchanged;
        for name in TRANSFORM_ATTRIBUTES {
            let Some(text) = element.attr(name) else {
                continue;
            };
            let Some(converted) = self.convert(text) else {
                continue;
            };
            if converted.is_empty() {
                element.remove_attr(name);
                outcome = ElementOutcome::Rewritten;
            } else if converted != text {
                element.set_attr(name, converted);
                outcome = ElementOutcome::Rewritten;
            }
        }
        outcome
    }
}

impl ElementProcessor for ConvertTransform {
    fn name(&self) -> &str {
        "convertTransform"
    }

    fn description(&self) -> &str {
        "Collapses multiple transforms into one, converts matrices to the short aliases"
    }

    fn process(&self, element: &mut Element, _style: &ComputedStyle) -> ElementOutcome {
        ConvertTransform::process(self, element)
    }
}
