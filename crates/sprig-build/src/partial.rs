//! Partial Builders
//!
//! A tag plus a fixed prefix of arguments. Every invocation constructs a
//! brand-new element, re-applies the prefix, then the call-time arguments,
//! so no state is shared between invocations.

use sprig_dom::{DomTree, NodeId};

use crate::{Arg, BuildResult, apply};

/// Reusable element builder bound to a tag and a fixed argument prefix
///
/// A fixed `Arg::Node` argument is deep-copied on every build, so each
/// element gets its own subtree and earlier builds keep their content.
#[derive(Debug, Clone)]
pub struct Partial {
    tag: String,
    fixed: Vec<Arg>,
}

impl Partial {
    pub fn new(tag: impl Into<String>, fixed: Vec<Arg>) -> Self {
        Self {
            tag: tag.into(),
            fixed,
        }
    }

    /// Tag this partial builds
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Build a fresh element: fixed prefix first, then `args`
    pub fn build(&self, tree: &mut DomTree, args: Vec<Arg>) -> BuildResult<NodeId> {
        let element = tree.create_element(&self.tag);
        for arg in &self.fixed {
            let arg = copy_nodes(tree, arg)?;
            apply(tree, element, arg)?;
        }
        for arg in args {
            apply(tree, element, arg)?;
        }
        Ok(element)
    }
}

// Node arguments in the fixed prefix are shared across invocations, so
// applying the id directly would steal the subtree from an earlier build.
fn copy_nodes(tree: &mut DomTree, arg: &Arg) -> BuildResult<Arg> {
    Ok(match arg {
        Arg::Node(id) => Arg::Node(tree.clone_subtree(*id)?),
        Arg::List(items) => Arg::List(
            items
                .iter()
                .map(|item| copy_nodes(tree, item))
                .collect::<BuildResult<Vec<_>>>()?,
        ),
        other => other.clone(),
    })
}
