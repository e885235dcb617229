//! Output formats for trees and token streams
//!
//! - diagram: `tree`-style rendering, the inverse of the diagram parser
//! - dictionary: nested JSON/YAML maps
//! - tokens: token dumps for the `token-*` processor stages

pub mod diagram;
pub mod dictionary;
pub mod registry;
pub mod tokens;

pub use diagram::{serialize, to_diagram, DiagramFormatter, SerializeError};
pub use dictionary::{to_json, to_yaml, JsonFormatter, YamlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
