//! Custom Components
//!
//! Registry of named component factories. Names follow custom-element
//! rules: they contain a hyphen, start with a lowercase ASCII letter, and
//! avoid the reserved SVG/MathML names.

use std::collections::HashMap;

use tracing::debug;

use sprig_build::BuildResult;
use sprig_dom::{DomTree, NodeId};

use crate::ComponentError;

/// Factory invoked to build a defined component's content
pub type ComponentFactory = Box<dyn Fn(&mut DomTree) -> BuildResult<NodeId>>;

/// Custom component registry
#[derive(Default)]
pub struct ComponentRegistry {
    definitions: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom component
    pub fn define<F>(&mut self, name: &str, factory: F) -> Result<(), ComponentError>
    where
        F: Fn(&mut DomTree) -> BuildResult<NodeId> + 'static,
    {
        if !Self::is_valid_name(name) {
            return Err(ComponentError::InvalidName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(ComponentError::AlreadyDefined(name.to_string()));
        }
        debug!(name, "defining component");
        self.definitions.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Check if a component is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Build an instance of a defined component
    pub fn create(&self, tree: &mut DomTree, name: &str) -> Result<NodeId, ComponentError> {
        let factory = self
            .definitions
            .get(name)
            .ok_or_else(|| ComponentError::NotDefined(name.to_string()))?;
        Ok(factory(tree)?)
    }

    fn is_valid_name(name: &str) -> bool {
        if !name.contains('-') {
            return false;
        }
        if !name
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(false)
        {
            return false;
        }
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }

        let reserved = [
            "annotation-xml",
            "color-profile",
            "font-face",
            "font-face-src",
            "font-face-uri",
            "font-face-format",
            "font-face-name",
            "missing-glyph",
        ];
        !reserved.contains(&name)
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("definitions", &self.definitions.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_build::{args, build};

    #[test]
    fn test_valid_names() {
        assert!(ComponentRegistry::is_valid_name("todo-item"));
        assert!(ComponentRegistry::is_valid_name("app-header"));
        assert!(!ComponentRegistry::is_valid_name("todoitem")); // no hyphen
        assert!(!ComponentRegistry::is_valid_name("Todo-Item")); // uppercase
        assert!(!ComponentRegistry::is_valid_name("font-face")); // reserved
    }

    #[test]
    fn test_define_and_create() {
        let mut registry = ComponentRegistry::new();
        registry
            .define("todo-item", |tree| build(tree, "li", args!["item"]))
            .unwrap();

        assert!(registry.is_defined("todo-item"));

        let mut tree = DomTree::new();
        let li = registry.create(&mut tree, "todo-item").unwrap();
        assert_eq!(tree.tag(li), Some("li"));
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut registry = ComponentRegistry::new();
        registry
            .define("todo-item", |tree| build(tree, "li", args![]))
            .unwrap();

        let result = registry.define("todo-item", |tree| build(tree, "div", args![]));
        assert_eq!(
            result,
            Err(ComponentError::AlreadyDefined("todo-item".to_string()))
        );
    }

    #[test]
    fn test_create_undefined_fails() {
        let registry = ComponentRegistry::new();
        let mut tree = DomTree::new();

        assert_eq!(
            registry.create(&mut tree, "nope-nope").unwrap_err(),
            ComponentError::NotDefined("nope-nope".to_string())
        );
    }
}
