//! Element Builder
//!
//! Creates a fresh element and applies arguments left-to-right. Attribute
//! arguments may overwrite earlier ones; content arguments always append,
//! so content order equals argument order. There is no rollback: on error
//! the element stays in the tree in its partially-built state and the
//! whole build is treated as failed.

use tracing::debug;

use sprig_dom::{DomTree, NodeId};

use crate::{Arg, BuildResult, Value, classify};

/// Build an element for `tag` and apply `args` in order
pub fn build(tree: &mut DomTree, tag: &str, args: Vec<Arg>) -> BuildResult<NodeId> {
    let element = tree.create_element(tag);
    debug!(tag, args = args.len(), "building element");
    for arg in args {
        apply(tree, element, arg)?;
    }
    Ok(element)
}

/// Build an element from dynamic values, classifying each in turn
///
/// Values are classified lazily, so arguments before a failing one have
/// already been applied when the error is returned.
pub fn build_value(tree: &mut DomTree, tag: &str, values: Vec<Value>) -> BuildResult<NodeId> {
    let element = tree.create_element(tag);
    debug!(tag, values = values.len(), "building element from values");
    for value in values {
        let arg = classify(value)?;
        apply(tree, element, arg)?;
    }
    Ok(element)
}

/// Apply one classified argument to `target`, mutating it in place
///
/// Lists flatten recursively: each item goes through this same dispatch,
/// at any nesting depth.
pub fn apply(tree: &mut DomTree, target: NodeId, arg: Arg) -> BuildResult<()> {
    match arg {
        Arg::Text(content) => {
            let text = tree.create_text(content);
            tree.append_child(target, text)?;
        }
        Arg::Attrs(attrs) => {
            for attr in attrs {
                tree.set_attribute(target, attr.name, attr.value)?;
            }
        }
        Arg::Node(id) => {
            tree.append_child(target, id)?;
        }
        Arg::List(items) => {
            for item in items {
                apply(tree, target, item)?;
            }
        }
    }
    Ok(())
}
