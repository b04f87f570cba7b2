//! Element Tree (arena-based allocation)
//!
//! All nodes live in one `Vec`; links between them are arena indices.
//! Detached subtrees stay allocated until the tree itself is dropped.

use tracing::debug;

use crate::{AttrMap, DomError, DomResult, Node, NodeId};

/// Arena-based element tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        debug!(tag, "create element");
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(Node::text(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0 as usize).ok_or(DomError::NotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.0 as usize).ok_or(DomError::NotFound)
    }

    /// Check if an id refers to a node in this tree
    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.valid()
    }

    /// Iterate over a node's children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next: first }
    }

    /// Number of children of a node
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Detaches `child` from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        if !self.node(parent)?.is_element() {
            return Err(DomError::NotAnElement);
        }
        self.node(child)?;
        self.detach(child)?;

        let last = self.node(parent)?.last_child;
        {
            let child_node = self.node_mut(child)?;
            child_node.parent = parent;
            child_node.prev_sibling = last;
            child_node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        self.node_mut(parent)?.last_child = child;
        Ok(())
    }

    /// Unlink a node from its parent
    ///
    /// Returns whether the node had a parent to be removed from.
    pub fn detach(&mut self, id: NodeId) -> DomResult<bool> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(false);
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(id)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(true)
    }

    /// Remove `child` from `parent`, returning the detached id
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child)?;
        Ok(child)
    }

    /// Detach every child of a node
    pub fn clear_children(&mut self, parent: NodeId) -> DomResult<()> {
        loop {
            let first = self.node(parent)?.first_child;
            if !first.is_valid() {
                return Ok(());
            }
            self.detach(first)?;
        }
    }

    /// Replace a node's content with the given children
    pub fn replace_content(&mut self, parent: NodeId, children: &[NodeId]) -> DomResult<()> {
        self.clear_children(parent)?;
        for &child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Set an attribute on an element node (last write wins)
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let element = self.node_mut(id)?.as_element_mut().ok_or(DomError::NotAnElement)?;
        element.attrs.set(name, value);
        Ok(())
    }

    /// Get an attribute value from an element node
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attrs.get(name)
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let element = self.node_mut(id)?.as_element_mut().ok_or(DomError::NotAnElement)?;
        Ok(element.attrs.remove(name))
    }

    /// Attribute map of an element node
    pub fn attrs(&self, id: NodeId) -> Option<&AttrMap> {
        self.get(id)?.as_element().map(|e| &e.attrs)
    }

    /// Deep-copy a node and everything under it
    ///
    /// The copy is detached; mutating it never affects the source subtree.
    pub fn clone_subtree(&mut self, id: NodeId) -> DomResult<NodeId> {
        let data = self.node(id)?.data.clone();
        let copy = self.push(Node::with_data(data));
        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            let child_copy = self.clone_subtree(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        if let Some(text) = node.as_text() {
            out.push_str(text);
            return;
        }
        for (child, _) in self.children(id) {
            self.collect_text(child, out);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, start: NodeId) -> bool {
        let mut current = start;
        while let Some(node) = self.get(current) {
            let parent = node.parent;
            if parent == ancestor {
                return true;
            }
            if !parent.is_valid() {
                return false;
            }
            current = parent;
        }
        false
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.valid()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_links() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let text = tree.create_text("hi");

        tree.append_child(div, span).unwrap();
        tree.append_child(span, text).unwrap();

        assert_eq!(tree.parent(span), Some(div));
        assert_eq!(tree.parent(text), Some(span));
        assert_eq!(tree.child_count(div), 1);
        assert_eq!(tree.text_content(div), "hi");
    }

    #[test]
    fn test_child_order() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        let c = tree.create_element("li");

        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();
        tree.append_child(ul, c).unwrap();

        let ids: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_detach_returns_whether_parented() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");

        assert_eq!(tree.detach(span), Ok(false));
        tree.append_child(div, span).unwrap();
        assert_eq!(tree.detach(span), Ok(true));
        assert_eq!(tree.parent(span), None);
        assert_eq!(tree.child_count(div), 0);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        let c = tree.create_element("li");
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();
        tree.append_child(ul, c).unwrap();

        tree.detach(b).unwrap();

        let ids: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_reappend_moves_node() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let span = tree.create_element("span");

        tree.append_child(first, span).unwrap();
        tree.append_child(second, span).unwrap();

        assert_eq!(tree.child_count(first), 0);
        assert_eq!(tree.parent(span), Some(second));
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();

        assert_eq!(tree.append_child(div, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(span, div), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_append_under_text_fails() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hi");
        let span = tree.create_element("span");

        assert_eq!(tree.append_child(text, span), Err(DomError::NotAnElement));
    }

    #[test]
    fn test_remove_child_checks_parentage() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let other = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();

        assert_eq!(tree.remove_child(other, span), Err(DomError::NotAChild));
        assert_eq!(tree.remove_child(div, span), Ok(span));
    }

    #[test]
    fn test_replace_content() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let old = tree.create_text("old");
        tree.append_child(div, old).unwrap();

        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.replace_content(div, &[a, b]).unwrap();

        assert_eq!(tree.text_content(div), "ab");
        assert_eq!(tree.child_count(div), 2);
    }

    #[test]
    fn test_attributes() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("hi");

        tree.set_attribute(div, "class", "row").unwrap();
        tree.set_attribute(div, "class", "col").unwrap();

        assert_eq!(tree.get_attribute(div, "class"), Some("col"));
        assert_eq!(tree.remove_attribute(div, "class").unwrap(), Some("col".to_string()));
        assert_eq!(tree.get_attribute(div, "class"), None);
        assert_eq!(tree.set_attribute(text, "x", "y"), Err(DomError::NotAnElement));
    }

    #[test]
    fn test_clone_subtree_is_independent() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let text = tree.create_text("hi");
        tree.set_attribute(div, "class", "card").unwrap();
        tree.append_child(div, span).unwrap();
        tree.append_child(span, text).unwrap();

        let copy = tree.clone_subtree(div).unwrap();

        assert_ne!(copy, div);
        assert_eq!(tree.parent(copy), None);
        assert_eq!(tree.get_attribute(copy, "class"), Some("card"));
        assert_eq!(tree.text_content(copy), "hi");

        let (copy_span, _) = tree.children(copy).next().unwrap();
        tree.set_attribute(copy, "class", "changed").unwrap();
        tree.clear_children(copy_span).unwrap();

        assert_eq!(tree.get_attribute(div, "class"), Some("card"));
        assert_eq!(tree.text_content(div), "hi");
    }

    #[test]
    fn test_stale_id() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");

        assert_eq!(tree.append_child(div, NodeId(99)), Err(DomError::NotFound));
        assert_eq!(tree.detach(NodeId::NONE), Err(DomError::NotFound));
    }
}
