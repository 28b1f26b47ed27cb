//! Attribute-bearing raw nodes handed over by hierarchy providers.
//!
//! # Responsibility
//! - Carry element name, attributes and element children of one exported node.
//! - Resolve attribute reads with caller-supplied defaults.
//!
//! # Invariants
//! - Element names are namespace-free local names (`Page`, not `one:Page`).
//! - Absence of an attribute is never an error at this layer.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

/// One exported element with its attributes and element children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<RawNode>,
}

impl RawNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn push_child(&mut self, child: RawNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the attribute value, or `default` when absent.
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Reads a numeric attribute; absent or unparseable values yield `default`.
    pub fn attr_f32_or(&self, name: &str, default: f32) -> f32 {
        self.attr(name)
            .and_then(|value| value.trim().parse::<f32>().ok())
            .unwrap_or(default)
    }

    /// Reads a boolean flag attribute; only `true` (any case) counts as set.
    pub fn attr_flag(&self, name: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    /// Reads an RFC 3339 timestamp attribute, keeping the offset it was
    /// written with so calendar dates stay on the author's clock.
    pub fn attr_timestamp(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.attr(name)
            .and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
    }

    pub fn children(&self) -> &[RawNode] {
        &self.children
    }

    /// Direct children with the given element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawNode> + 'a {
        self.children.iter().filter(move |child| child.is(name))
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&RawNode> {
        self.children.iter().find(|child| child.is(name))
    }

    /// All descendants (excluding `self`) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Descendants with the given element name, in document order.
    pub fn descendants_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RawNode> + 'a {
        self.descendants().filter(move |node| node.is(name))
    }
}

/// Pre-order iterator over a node's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a RawNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a RawNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
