//! # treemancer
//!
//! Turns compact descriptions of directory hierarchies into trees, and trees
//! back into ASCII diagrams or real directories.
//!
//! Two input languages are supported:
//!
//! - the declarative syntax (`project > src > main.py | tests > test.py`), see
//!   [parser::declarative](treemancer::parser::declarative);
//! - ASCII tree diagrams as printed by `tree` or written in READMEs, see
//!   [parser::diagram](treemancer::parser::diagram).
//!
//! ## Testing
//!
//! Tree assertions live in the [testing module](treemancer::testing).

pub mod treemancer;

pub use treemancer::ast::{Node, NodeKind};
pub use treemancer::error::Error;
pub use treemancer::parser::{DeclarativeParser, DiagramParser, SourceSyntax, TreeParser};
