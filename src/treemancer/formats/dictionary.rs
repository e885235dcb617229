//! Nested-map export of trees
//!
//! Every node becomes `{name, kind, children}`; files omit `children`. This is
//! the shape other tools consume when they want the tree without parsing a
//! diagram.

use super::registry::{FormatError, Formatter};
use crate::treemancer::ast::Node;

pub fn to_json(tree: &Node) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn to_yaml(tree: &Node) -> Result<String, FormatError> {
    serde_yaml::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        to_json(tree)
    }

    fn description(&self) -> &str {
        "Nested JSON objects"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        to_yaml(tree)
    }

    fn description(&self) -> &str {
        "Nested YAML mappings"
    }
}
