//! Views
//!
//! A renderable piece of UI and a remembered container to re-render it
//! into. Refreshing replaces the container's content wholesale; there is
//! no diffing.

use sprig_build::BuildResult;
use sprig_dom::{DomTree, NodeId};

/// A renderable piece of UI
pub trait View {
    /// Produce fresh content; `None` leaves the container untouched
    fn render(&mut self, tree: &mut DomTree) -> BuildResult<Option<NodeId>>;
}

/// Remembered container for re-rendering a view in place
#[derive(Debug, Clone, Copy)]
pub struct Mount {
    container: NodeId,
}

impl Mount {
    pub fn new(container: NodeId) -> Self {
        Self { container }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Render the view and replace the container's content with the result
    pub fn refresh<V: View>(&self, tree: &mut DomTree, view: &mut V) -> BuildResult<()> {
        if let Some(content) = view.render(tree)? {
            tree.replace_content(self.container, &[content])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_build::{args, build};
    use sprig_dom::inner_html;

    struct Counter {
        count: u32,
    }

    impl View for Counter {
        fn render(&mut self, tree: &mut DomTree) -> BuildResult<Option<NodeId>> {
            let span = build(tree, "span", args![self.count.to_string()])?;
            Ok(Some(span))
        }
    }

    struct Silent;

    impl View for Silent {
        fn render(&mut self, _tree: &mut DomTree) -> BuildResult<Option<NodeId>> {
            Ok(None)
        }
    }

    #[test]
    fn test_refresh_replaces_content() {
        let mut tree = DomTree::new();
        let container = tree.create_element("div");
        let mount = Mount::new(container);
        let mut counter = Counter { count: 1 };

        mount.refresh(&mut tree, &mut counter).unwrap();
        assert_eq!(inner_html(&tree, container), "<span>1</span>");

        counter.count = 2;
        mount.refresh(&mut tree, &mut counter).unwrap();

        // Old content is replaced, not accumulated.
        assert_eq!(inner_html(&tree, container), "<span>2</span>");
        assert_eq!(tree.child_count(container), 1);
    }

    #[test]
    fn test_none_render_leaves_container_alone() {
        let mut tree = DomTree::new();
        let container = tree.create_element("div");
        let existing = tree.create_text("keep");
        tree.append_child(container, existing).unwrap();

        Mount::new(container)
            .refresh(&mut tree, &mut Silent)
            .unwrap();

        assert_eq!(tree.text_content(container), "keep");
    }
}
