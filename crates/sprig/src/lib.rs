//! Sprig - Element-tree construction with scoped events
//!
//! Builds element trees programmatically through a variadic-style builder
//! with polymorphic argument dispatch, reusable partial builders, a tag
//! registry, and an observer system that preserves each subscriber's
//! scope.
//!
//! ```
//! use sprig::prelude::*;
//!
//! let mut tree = DomTree::new();
//! let ns = sprig::init();
//!
//! let item = ns.build(&mut tree, "li", args!["milk"]).unwrap();
//! let list = ns.build(&mut tree, "ul", args![
//!     AttrMap::new().with("class", "groceries"),
//!     item,
//! ]).unwrap();
//!
//! assert_eq!(to_html(&tree, list), r#"<ul class="groceries"><li>milk</li></ul>"#);
//! ```

pub use sprig_build::{
    Arg, BuildError, BuildResult, DEFAULT_TAGS, Partial, TagRegistry, Value, apply, args, build,
    build_value, classify,
};
pub use sprig_dom::{
    Attr, AttrMap, Children, DomError, DomResult, DomTree, ElementData, Node, NodeData, NodeId,
    inner_html, to_html,
};
pub use sprig_events::{
    Component, ComponentError, ComponentFactory, ComponentRegistry, Emitter, EventCallback,
    ListenerToken, Mount, NodeEvent, NodeEvents, NodeListenerToken, Scope, Scoped, View, fire,
    listen, unlisten,
};

/// Registry bound to the built-in common-tag set
pub fn init() -> TagRegistry {
    TagRegistry::with_default_tags()
}

/// Registry bound to the given tags
pub fn init_with(tags: &[&str]) -> TagRegistry {
    TagRegistry::with_tags(tags)
}

/// Common imports
pub mod prelude {
    pub use crate::{
        Arg, AttrMap, Component, DomTree, Emitter, Mount, NodeEvents, NodeId, Partial, Scoped,
        TagRegistry, Value, View, args, build, build_value, fire, inner_html, listen, to_html,
        unlisten,
    };
}
