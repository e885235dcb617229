//! Fluent assertion API for trees

use crate::treemancer::ast::{Node, NodeKind};

/// Create an assertion builder for a tree
pub fn assert_tree(tree: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node: tree,
        context: tree.name().to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    /// Slash-joined path from the root, used in failure messages
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.node.name(),
            expected,
            "{}: Expected name '{}', found '{}'",
            self.context,
            expected,
            self.node.name()
        );
        self
    }

    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    pub fn is_dir(self) -> Self {
        self.kind(NodeKind::Directory)
    }

    pub fn is_file(self) -> Self {
        self.kind(NodeKind::File)
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_children(self.node)
        );
        self
    }

    /// Assert the names of the direct children, in order
    pub fn children_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.node.children().iter().map(Node::name).collect();
        assert_eq!(
            actual, expected,
            "{}: Children names differ",
            self.context
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(self.descend(&children[index]));
        self
    }

    /// Assert on the first child with the given name
    pub fn child_named<F, R>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let child = self
            .node
            .children()
            .iter()
            .find(|child| child.name() == name)
            .unwrap_or_else(|| {
                panic!(
                    "{}: No child named '{}' in [{}]",
                    self.context,
                    name,
                    summarize_children(self.node)
                )
            });
        assertion(self.descend(child));
        self
    }

    /// Assert a slash-joined path (starting at this node) exists in the subtree
    pub fn has_path(self, path: &str) -> Self {
        let paths = self.node.paths();
        assert!(
            paths.iter().any(|p| p == path),
            "{}: Path '{}' not found in {:?}",
            self.context,
            path,
            paths
        );
        self
    }

    /// Count of files in the whole subtree
    pub fn file_count(self, expected: usize) -> Self {
        let actual = self.node.count_files();
        assert_eq!(
            actual, expected,
            "{}: Expected {} files in subtree, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Count of directories in the whole subtree, this node included
    pub fn directory_count(self, expected: usize) -> Self {
        let actual = self.node.count_directories();
        assert_eq!(
            actual, expected,
            "{}: Expected {} directories in subtree, found {}",
            self.context, expected, actual
        );
        self
    }

    fn descend(&self, child: &'a Node) -> NodeAssertion<'a> {
        NodeAssertion {
            node: child,
            context: format!("{}/{}", self.context, child.name()),
        }
    }
}

fn summarize_children(node: &Node) -> String {
    node.children()
        .iter()
        .map(|child| {
            if child.is_dir() {
                format!("{}/", child.name())
            } else {
                child.name().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
