//! Tag Registry
//!
//! Explicit registry of shorthand builders, one partial per tag. Installing
//! into a caller-supplied map is the opt-in replacement for writing builder
//! functions onto a global namespace; tearing the map down afterwards is
//! the caller's responsibility.

use std::collections::HashMap;

use tracing::debug;

use sprig_dom::{DomTree, NodeId};

use crate::{Arg, BuildError, BuildResult, Partial};

/// Tag set bound by [`TagRegistry::with_default_tags`]
pub const DEFAULT_TAGS: &[&str] = &[
    "body", "div", "span", "pre", "p", "a", "ul", "ol", "li",
    "h1", "h2", "h3", "h4", "h5", "h6", "strong",
    "section", "header", "footer", "br",
    "form", "label", "input", "textarea", "select", "option", "button",
    "table", "thead", "tbody", "tfoot", "tr", "th", "td",
];

/// Registry of tag shorthand builders
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, Partial>,
}

impl TagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in common-tag set
    pub fn with_default_tags() -> Self {
        Self::with_tags(DEFAULT_TAGS)
    }

    /// Registry holding the given tags
    pub fn with_tags(tags: &[&str]) -> Self {
        let mut registry = Self::new();
        for tag in tags {
            registry.register(tag);
        }
        registry
    }

    /// Bind a plain builder (no fixed arguments) under the tag's own name
    ///
    /// Re-registering a tag is idempotent.
    pub fn register(&mut self, tag: &str) {
        self.tags.insert(tag.to_string(), Partial::new(tag, Vec::new()));
    }

    /// Bind a partial under an arbitrary name
    pub fn register_partial(&mut self, name: &str, partial: Partial) {
        self.tags.insert(name.to_string(), partial);
    }

    /// Look up the builder for a name
    pub fn get(&self, name: &str) -> Option<&Partial> {
        self.tags.get(name)
    }

    /// Check if a name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Build an element through a registered builder
    pub fn build(&self, tree: &mut DomTree, name: &str, args: Vec<Arg>) -> BuildResult<NodeId> {
        let partial = self
            .get(name)
            .ok_or_else(|| BuildError::UnknownTag(name.to_string()))?;
        partial.build(tree, args)
    }

    /// Copy every binding into a caller-supplied map
    ///
    /// Existing entries under the same names are overwritten; unrelated
    /// entries are left alone. Installing twice rebinds the same builders.
    pub fn install_into(&self, target: &mut HashMap<String, Partial>) {
        debug!(count = self.tags.len(), "installing tag builders");
        for (name, partial) in &self.tags {
            target.insert(name.clone(), partial.clone());
        }
    }
}
