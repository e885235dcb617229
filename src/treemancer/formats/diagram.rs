//! Diagram formatter for trees
//!
//! Renders a tree in the layout printed by `tree`, one line per node:
//!
//!     project/
//!     ├── src/
//!     │   └── main.rs
//!     └── README.md
//!
//! The root is printed bare. Directories carry a trailing `/` so the kind
//! survives a round trip through the diagram parser, which reads this output
//! back into an identical tree.

use super::registry::{FormatError, Formatter};
use crate::treemancer::ast::Node;
use thiserror::Error;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("cannot serialize a tree without a root")]
    NoRoot,
}

/// Serialize an optional tree.
pub fn serialize(root: Option<&Node>) -> Result<String, SerializeError> {
    root.map(to_diagram).ok_or(SerializeError::NoRoot)
}

/// Render a tree as a diagram, ending with a newline.
pub fn to_diagram(root: &Node) -> String {
    let mut output = format!("{}\n", label(root));
    let child_count = root.children().len();
    for (i, child) in root.children().iter().enumerate() {
        format_node(&mut output, child, "", i == child_count - 1);
    }
    output
}

fn format_node(output: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { LAST_BRANCH } else { BRANCH };
    output.push_str(prefix);
    output.push_str(connector);
    output.push_str(&label(node));
    output.push('\n');

    let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
    let child_count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        format_node(output, child, &child_prefix, i == child_count - 1);
    }
}

fn label(node: &Node) -> String {
    if node.is_dir() {
        format!("{}/", node.name())
    } else {
        node.name().to_string()
    }
}

pub struct DiagramFormatter;

impl Formatter for DiagramFormatter {
    fn name(&self) -> &str {
        "diagram"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(to_diagram(tree))
    }

    fn description(&self) -> &str {
        "ASCII tree diagram"
    }
}
