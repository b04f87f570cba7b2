//! Sprig DOM - Element tree
//!
//! Arena-based element tree: nodes, attributes, serialization.

mod attributes;
mod node;
mod serialize;
mod tree;

pub use attributes::{Attr, AttrMap};
pub use node::{ElementData, Node, NodeData};
pub use serialize::{inner_html, to_html};
pub use tree::{Children, DomTree};

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert the sentinel into `None`
    #[inline]
    pub fn valid(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}

/// Result type for tree operations
pub type DomResult<T> = Result<T, DomError>;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node not found")]
    NotFound,

    #[error("node is not an element")]
    NotAnElement,

    #[error("node cannot contain itself or one of its ancestors")]
    HierarchyRequest,

    #[error("node is not a child of the given parent")]
    NotAChild,
}
