//! The owned tree handed out by the parsers

use super::kind::NodeKind;
use serde::Serialize;
use std::path::Path;

/// One entry of a finished tree.
///
/// Fields are private so a `File` can never gain children; build nodes with
/// [`Node::file`] and [`Node::directory`] or get them from a parser.
/// Equality is structural: name, kind and children in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    name: String,
    kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Lowercased extension of the name, if it has one
    pub fn extension(&self) -> Option<String> {
        if !super::kind::has_extension(&self.name) {
            return None;
        }
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }

    /// Depth-first, pre-order walk yielding `(depth, node)`, root at depth 0
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    pub fn count_files(&self) -> usize {
        self.walk().filter(|(_, node)| node.is_file()).count()
    }

    pub fn count_directories(&self) -> usize {
        self.walk().filter(|(_, node)| node.is_dir()).count()
    }

    /// Slash-joined path of every node, in walk order.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(self, "", &mut paths);
        paths
    }
}

fn collect_paths(node: &Node, prefix: &str, out: &mut Vec<String>) {
    let path = if prefix.is_empty() {
        node.name.clone()
    } else {
        format!("{}/{}", prefix, node.name)
    };
    out.push(path.clone());
    for child in &node.children {
        collect_paths(child, &path, out);
    }
}

/// Iterator returned by [`Node::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
