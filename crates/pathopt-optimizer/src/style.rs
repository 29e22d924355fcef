//! Computed style values the optimizer depends on
//!
//! Only the properties that decide whether a rewrite is visible are kept:
//! stroke presence, width and caps, and markers. Values come from the
//! style cascade, which lives outside this crate.

use crate::element::Element;
use serde::{Deserialize, Serialize};

/// A resolved style property
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleValue {
    /// The cascade produced this value
    Known(String),
    /// The value depends on context the cascade cannot see (media queries,
    /// pseudo-classes, inline `style`), so any value is possible.
    DependsOnContext,
    /// The property is not set
    #[default]
    Absent,
}

impl StyleValue {
    pub fn known(&self) -> Option<&str> {
        match self {
            Self::Known(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn depends_on_context(&self) -> bool {
        matches!(self, Self::DependsOnContext)
    }

    /// Whether the property may have a value other than `none_value`
    fn may_differ_from(&self, none_value: &str) -> bool {
        match self {
            Self::Known(value) => value.trim() != none_value,
            Self::DependsOnContext => true,
            Self::Absent => false,
        }
    }
}

/// Style properties of one element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub stroke: StyleValue,
    pub stroke_width: StyleValue,
    pub stroke_linecap: StyleValue,
    pub marker_start: StyleValue,
    pub marker_mid: StyleValue,
    pub marker_end: StyleValue,
}

impl ComputedStyle {
    /// Resolve from presentation attributes, inheriting from `parent`.
    ///
    /// An element with a `style` attribute makes every property it does not
    /// set as an attribute depend on context, since the declaration there
    /// may override it.
    pub fn from_attributes(element: &Element, parent: Option<&ComputedStyle>) -> Self {
        let inline_style = element.has_attr("style");
        let resolve = |name: &str, inherited: Option<&StyleValue>| match element.attr(name) {
            Some(value) if value.trim() == "inherit" => inherited.cloned().unwrap_or_default(),
            Some(value) => StyleValue::Known(value.trim().to_string()),
            None if inline_style => StyleValue::DependsOnContext,
            None => inherited.cloned().unwrap_or_default(),
        };
        Self {
            stroke: resolve("stroke", parent.map(|p| &p.stroke)),
            stroke_width: resolve("stroke-width", parent.map(|p| &p.stroke_width)),
            stroke_linecap: resolve("stroke-linecap", parent.map(|p| &p.stroke_linecap)),
            marker_start: resolve("marker-start", parent.map(|p| &p.marker_start)),
            marker_mid: resolve("marker-mid", parent.map(|p| &p.marker_mid)),
            marker_end: resolve("marker-end", parent.map(|p| &p.marker_end)),
        }
    }

    /// Whether a stroke may be painted
    pub fn may_have_stroke(&self) -> bool {
        self.stroke.may_differ_from("none")
    }

    /// Whether zero-length segments may show as dots: a stroke with round or
    /// square caps.
    pub fn may_show_line_caps(&self) -> bool {
        self.may_have_stroke() && self.stroke_linecap.may_differ_from("butt")
    }

    pub fn has_marker_mid(&self) -> bool {
        self.marker_mid.may_differ_from("none")
    }

    /// Whether a start or end marker may be drawn
    pub fn has_end_markers(&self) -> bool {
        self.marker_start.may_differ_from("none") || self.marker_end.may_differ_from("none")
    }

    pub fn has_markers(&self) -> bool {
        self.has_end_markers() || self.has_marker_mid()
    }

    /// Whether stroke or stroke width depend on context
    pub fn stroke_depends_on_context(&self) -> bool {
        self.stroke.depends_on_context() || self.stroke_width.depends_on_context()
    }
}
