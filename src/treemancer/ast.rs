//! Tree model shared by every parser, the serializer and the creator.
//!
//! Parsers build into a [`TreeArena`] while reading input: nodes are addressed by
//! index, carry a non-owning parent link, and may still have an undecided kind.
//! Once structure is final the arena resolves kinds bottom-up and is frozen into
//! an owned [`Node`] tree, which is what callers receive.

pub mod arena;
pub mod kind;
pub mod location;
pub mod node;

pub use arena::{ArenaNode, NodeId, TreeArena};
pub use kind::{has_extension, KindOrigin, NodeKind};
pub use location::{Position, SourceLocation};
pub use node::Node;
