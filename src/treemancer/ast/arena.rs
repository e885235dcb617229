//! Index arena used while a tree is being parsed
//!
//! Both parsers attach nodes the moment they are created, so the arena never
//! holds detached nodes. Children are owned by index; `parent` is a plain
//! back-reference used to walk up the tree and is never followed for
//! ownership. Node ids grow monotonically and a child is always created after
//! its parent, which lets [`TreeArena::infer_kinds`] run bottom-up by simply
//! iterating ids in reverse.

use super::kind::{infer_kind, KindOrigin, NodeKind};
use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaNode {
    pub name: String,
    /// `None` until a hint fixes it or inference runs
    pub kind: Option<NodeKind>,
    pub origin: Option<KindOrigin>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a parentless node. `fixed` pins the kind against inference.
    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        fixed: Option<(NodeKind, KindOrigin)>,
    ) -> NodeId {
        self.push(name.into(), fixed, None)
    }

    /// Create a node and append it to `parent`'s children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        fixed: Option<(NodeKind, KindOrigin)>,
    ) -> NodeId {
        let id = self.push(name.into(), fixed, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(
        &mut self,
        name: String,
        fixed: Option<(NodeKind, KindOrigin)>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ArenaNode {
            name,
            kind: fixed.map(|(kind, _)| kind),
            origin: fixed.map(|(_, origin)| origin),
            children: Vec::new(),
            parent,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &ArenaNode {
        &self.nodes[id.0]
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of ancestors above `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    /// Resolve every undecided kind, children before parents.
    ///
    /// Nodes that already have a kind are left untouched, so running this
    /// again on a resolved arena changes nothing.
    pub fn infer_kinds(&mut self) {
        for index in (0..self.nodes.len()).rev() {
            let node = &mut self.nodes[index];
            if node.kind.is_some() {
                continue;
            }
            let (kind, origin) = infer_kind(&node.name, !node.children.is_empty());
            node.kind = Some(kind);
            node.origin = Some(origin);
        }
    }

    /// Resolve kinds and build the owned tree rooted at `root`.
    pub fn into_tree(mut self, root: NodeId) -> Node {
        self.infer_kinds();
        self.build(root)
    }

    fn build(&self, id: NodeId) -> Node {
        let node = &self.nodes[id.0];
        match node.kind {
            Some(NodeKind::Directory) => Node::directory(
                node.name.clone(),
                node.children.iter().map(|&child| self.build(child)).collect(),
            ),
            // Parsers refuse children under a file hint, and inference only
            // yields File for childless nodes.
            _ => Node::file(node.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_insertion_order_and_parent_links() {
        let mut arena = TreeArena::new();
        let root = arena.add_root("root", None);
        let b = arena.add_child(root, "b", None);
        let a = arena.add_child(root, "a", None);

        assert_eq!(arena.get(root).children, vec![b, a]);
        assert_eq!(arena.parent(a), Some(root));
        assert_eq!(arena.parent(root), None);
        assert_eq!(arena.last_child(root), Some(a));
        assert_eq!(arena.depth(a), 1);
    }

    #[test]
    fn test_inference_sees_final_children() {
        let mut arena = TreeArena::new();
        let root = arena.add_root("root", None);
        let lib = arena.add_child(root, "lib.rs", None);
        // A child arriving later still turns `lib.rs` into a directory.
        arena.add_child(lib, "mod.rs", None);
        arena.infer_kinds();

        assert_eq!(arena.get(lib).kind, Some(NodeKind::Directory));
        assert_eq!(arena.get(lib).origin, Some(KindOrigin::Children));
    }

    #[test]
    fn test_inference_is_idempotent() {
        let mut arena = TreeArena::new();
        let root = arena.add_root("app", None);
        arena.add_child(root, "Makefile", None);
        arena.add_child(root, "assets", Some((NodeKind::Directory, KindOrigin::Hint)));
        arena.add_child(root, "main.rs", None);

        arena.infer_kinds();
        let once = arena.clone();
        arena.infer_kinds();

        for index in 0..arena.len() {
            assert_eq!(arena.nodes[index], once.nodes[index]);
        }
    }

    #[test]
    fn test_hint_survives_inference() {
        let mut arena = TreeArena::new();
        let root = arena.add_root("app", None);
        let assets = arena.add_child(root, "assets", Some((NodeKind::Directory, KindOrigin::Hint)));
        let tree = arena.into_tree(root);

        assert!(tree.is_dir());
        assert!(tree.children()[0].is_dir());
        assert!(tree.children()[0].children().is_empty());
        assert_eq!(assets.index(), 1);
    }
}
