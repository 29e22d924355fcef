//! # pathopt Optimizer
//!
//! Element-level optimizations built on `pathopt-path`: path data
//! rewriting with transform folding, transform list shortening and merging
//! of sibling paths.
//!
//! The document tree and the style cascade live outside this crate. A
//! driver hands each element over as an [`Element`] together with its
//! [`ComputedStyle`] and applies the returned [`ElementOutcome`].

pub mod apply_transforms;
pub mod convert_path_data;
pub mod convert_transform;
pub mod element;
pub mod merge_paths;
pub mod processor;
pub mod style;

pub use apply_transforms::apply_transforms;
pub use convert_path_data::ConvertPathData;
pub use convert_transform::{ConvertTransform, TRANSFORM_ATTRIBUTES};
pub use element::Element;
pub use merge_paths::MergePaths;
pub use processor::{process_all, ElementOutcome, ElementProcessor, ProcessorHandle};
pub use style::{ComputedStyle, StyleValue};

use pathopt_settings::Config;
use std::sync::Arc;

/// The processors of one configuration, ready to run
pub struct Optimizer {
    processors: Vec<ProcessorHandle>,
    merge: MergePaths,
}

impl Optimizer {
    pub fn from_config(config: &Config) -> Self {
        let processors: Vec<ProcessorHandle> = vec![
            Arc::new(ConvertPathData::new(config.path_data.clone())),
            Arc::new(ConvertTransform::new(config.transforms.clone())),
        ];
        Self {
            processors,
            merge: MergePaths::new(config.merge.clone()),
        }
    }

    pub fn processors(&self) -> &[ProcessorHandle] {
        &self.processors
    }

    /// Run `convertPathData` then `convertTransform` over one element.
    pub fn optimize_element(&self, element: &mut Element, style: &ComputedStyle) -> ElementOutcome {
        process_all(&self.processors, element, style)
    }

    /// Merge paths among the children of one parent.
    pub fn optimize_siblings<F>(&self, siblings: &mut Vec<Element>, style_of: F) -> usize
    where
        F: Fn(&Element) -> ComputedStyle,
    {
        self.merge.merge_siblings(siblings, style_of)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
