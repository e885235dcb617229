//! Testing utilities for tree assertions
//!
//! Comparing whole trees with `assert_eq!` works for small cases, but the
//! failure output of a deep mismatch is a wall of `Node { .. }` debug text. The
//! fluent [`assert_tree`](fn@assert_tree) API checks only what a test cares
//! about and reports failures with the path of the offending node:
//!
//! ```rust-example
//! use treemancer::treemancer::testing::assert_tree;
//!
//! assert_tree(&tree)
//!     .is_dir()
//!     .name("project")
//!     .children_names(&["src", "README.md"])
//!     .child(0, |src| {
//!         src.is_dir().child_count(1).child(0, |main| main.is_file().name("main.rs"));
//!     });
//! ```

mod tree_assertions;

pub use tree_assertions::{assert_tree, NodeAssertion};
