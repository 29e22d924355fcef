//! Common interface of the element processors

use crate::element::Element;
use crate::style::ComputedStyle;
use std::sync::Arc;

/// What a processor did to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementOutcome {
    Unchanged,
    /// At least one attribute was rewritten or removed
    Rewritten,
    /// The element draws nothing and should be detached
    Remove,
}

impl ElementOutcome {
    /// Combine the outcomes of two processors run one after the other
    pub fn then(self, next: ElementOutcome) -> ElementOutcome {
        match (self, next) {
            (Self::Remove, _) | (_, Self::Remove) => Self::Remove,
            (Self::Rewritten, _) | (_, Self::Rewritten) => Self::Rewritten,
            _ => Self::Unchanged,
        }
    }
}

/// Rewrites one element in place
///
/// Processors are stateless between elements, so one instance can serve a
/// whole document, or several threads.
pub trait ElementProcessor: Send + Sync {
    /// Short identifier, e.g. `convertPathData`
    fn name(&self) -> &str;

    /// What this processor does
    fn description(&self) -> &str;

    /// Optimize `element`, whose computed style is `style`.
    fn process(&self, element: &mut Element, style: &ComputedStyle) -> ElementOutcome;

    /// Check if this processor is enabled
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Shared processor handle
pub type ProcessorHandle = Arc<dyn ElementProcessor>;

/// Run every enabled processor over `element`, stopping early once one of
/// them asks for the element to be removed.
pub fn process_all(
    processors: &[ProcessorHandle],
    element: &mut Element,
    style: &ComputedStyle,
) -> ElementOutcome {
    let mut outcome = ElementOutcome::Unchanged;
    for processor in processors.iter().filter(|p| p.is_enabled()) {
        outcome = outcome.then(processor.process(element, style));
        tracing::trace!("{} on <{}>: {:?}", processor.name(), element.name, outcome);
        if outcome == ElementOutcome::Remove {
            break;
        }
    }
    outcome
}
