//! The `mergePaths` processor
//!
//! Runs of sibling `path` elements with identical attributes are drawn
//! into the first path of the run, as long as their outlines do not
//! overlap. Overlap matters because the merged path is filled as a whole:
//! with `evenodd`, or with opacity, the shared area would render
//! differently.

use crate::element::Element;
use crate::style::ComputedStyle;
use pathopt_path::{intersects, parse_path, serialize, Command};
use pathopt_settings::MergeSettings;
use tracing::debug;

/// Attributes whose `url(#id)` target is sized by the element's bounding
/// box, which merging would change
const BOUNDING_BOX_REFERENCES: [&str; 5] = ["fill", "stroke", "filter", "clip-path", "mask"];

/// Merges sibling paths
#[derive(Debug, Clone, Default)]
pub struct MergePaths {
    settings: MergeSettings,
}

/// The path currently absorbing its followers
struct Target {
    index: usize,
    /// Commands drawn so far, set once a follower has been merged
    data: Option<Vec<Command>>,
}

impl MergePaths {
    pub fn new(settings: MergeSettings) -> Self {
        Self { settings }
    }

    /// Merge runs of mergeable paths in `siblings`, removing the absorbed
    /// elements. Returns how many elements were removed.
    pub fn merge_siblings<F>(&self, siblings: &mut Vec<Element>, style_of: F) -> usize
    where
        F: Fn(&Element) -> ComputedStyle,
    {
        let mut removed = vec![false; siblings.len()];
        let mut target: Option<Target> = None;

        for index in 0..siblings.len() {
            let child = &siblings[index];
            if !is_mergeable(child) {
                self.finish(siblings, target.take());
                continue;
            }
            if style_of(child).has_markers() {
                self.finish(siblings, target.take());
                target = Some(Target { index, data: None });
                continue;
            }

            let Some(current) = target.as_mut() else {
                target = Some(Target { index, data: None });
                continue;
            };
            let prev = &siblings[current.index];
            if !same_attributes(prev, child) {
                self.finish(siblings, target.replace(Target { index, data: None }));
                continue;
            }

            let child_data = parse_path(child.attr("d").unwrap_or_default()).into_commands();
            let merged_before = current.data.is_some();
            let mut prev_data = current
                .data
                .take()
                .unwrap_or_else(|| parse_path(prev.attr("d").unwrap_or_default()).into_commands());

            if self.settings.force || !intersects(&prev_data, &child_data) {
                debug!("Merging path {} into path {}", index, current.index);
                prev_data.extend(child_data);
                current.data = Some(prev_data);
                removed[index] = true;
                continue;
            }
            if merged_before {
                current.data = Some(prev_data);
            }
            self.finish(siblings, target.replace(Target { index, data: None }));
        }
        self.finish(siblings, target);

        let count = removed.iter().filter(|&&r| r).count();
        let mut flags = removed.into_iter();
        siblings.retain(|_| !flags.next().unwrap_or(false));
        count
    }

    /// Write the merged data back into the target path
    fn finish(&self, siblings: &mut [Element], target: Option<Target>) {
        if let Some(Target {
            index,
            data: Some(data),
        }) = target
        {
            let d = serialize(&data, &self.settings.formatter());
            siblings[index].set_attr("d", d);
        }
    }
}

/// A childless `path` with data and no bounding-box-relative references
fn is_mergeable(element: &Element) -> bool {
    element.is("path")
        && !element.has_children
        && element.has_attr("d")
        && !BOUNDING_BOX_REFERENCES
            .iter()
            .filter_map(|name| element.attr(name))
            .any(|value| value.contains("url("))
}

/// Whether every attribute other than `d` is present on both with the
/// same value
fn same_attributes(a: &Element, b: &Element) -> bool {
    a.attributes.len() == b.attributes.len()
        && a.attributes
            .iter()
            .filter(|(name, _)| name.as_str() != "d")
            .all(|(name, value)| b.attr(name) == Some(value.as_str()))
}
