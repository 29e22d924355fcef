//! Element handle exchanged with the document tree
//!
//! The optimizer never owns a document. The tree layer hands it one element
//! at a time (or one run of siblings) and writes the attributes back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One markup element: name, attributes and whether it has child nodes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub has_children: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr)
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        let mut path = Element::new("path").with_attr("d", "M0 0");
        assert_eq!(path.attr("d"), Some("M0 0"));
        assert!(path.is("path"));

        path.set_attr("fill", "red");
        assert_eq!(path.remove_attr("fill"), Some("red".to_string()));
        assert!(!path.has_attr("fill"));
    }
}
