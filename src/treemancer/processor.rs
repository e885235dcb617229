//! Processing API behind `treemancer inspect`
//!
//! A processing spec names a stage and a format, `<stage>-<format>`:
//!
//! - `token-simple`, `token-json`: the lexer's token stream
//! - `tree-diagram`, `tree-json`, `tree-yaml`, `tree-stats`: the parsed tree,
//!   rendered through the [`FormatRegistry`]

use crate::treemancer::error::Error;
use crate::treemancer::formats::{tokens, FormatError, FormatRegistry};
use crate::treemancer::lexer::{tokenize_declarative, tokenize_diagram};
use crate::treemancer::parser::SourceSyntax;
use crate::treemancer::source::{extract_diagram_text, SourceError};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Tree,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Diagram,
    Yaml,
    Stats,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Diagram => "diagram",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Stats => "stats",
        }
    }
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "tree-diagram"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "tree" => ProcessingStage::Tree,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "diagram" => OutputFormat::Diagram,
            "yaml" => OutputFormat::Yaml,
            "stats" => OutputFormat::Stats,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Token, other) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{}' only works with the tree stage",
                    other.name()
                )))
            }
            (ProcessingStage::Tree, OutputFormat::Simple) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with the token stage".to_string(),
                ))
            }
            (ProcessingStage::Tree, _) => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let spec = |stage, format| ProcessingSpec { stage, format };
        vec![
            spec(ProcessingStage::Token, OutputFormat::Simple),
            spec(ProcessingStage::Token, OutputFormat::Json),
            spec(ProcessingStage::Tree, OutputFormat::Diagram),
            spec(ProcessingStage::Tree, OutputFormat::Json),
            spec(ProcessingStage::Tree, OutputFormat::Yaml),
            spec(ProcessingStage::Tree, OutputFormat::Stats),
        ]
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Tree => "tree",
        };
        write!(f, "{}-{}", stage, self.format.name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error(transparent)]
    Io(#[from] SourceError),
    #[error(transparent)]
    Tree(#[from] Error),
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::InvalidFormatType(err.to_string())
    }
}

/// Process source text according to the given specification
pub fn process_str(
    source: &str,
    syntax: SourceSyntax,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = match syntax {
                SourceSyntax::Declarative => tokenize_declarative(source).map_err(Error::from)?,
                SourceSyntax::Diagram => tokenize_diagram(source),
            };
            match spec.format {
                OutputFormat::Json => Ok(tokens::to_json(&tokens)?),
                _ => Ok(tokens::to_simple(&tokens, source)),
            }
        }
        ProcessingStage::Tree => {
            let tree = syntax.parse(source)?;
            let registry = FormatRegistry::with_defaults();
            Ok(registry.serialize(&tree, spec.format.name())?)
        }
    }
}

/// Process a file according to the given specification.
///
/// Diagram files are run through fenced-block extraction first.
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    syntax: SourceSyntax,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| SourceError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    let source = match syntax {
        SourceSyntax::Diagram => extract_diagram_text(&content),
        SourceSyntax::Declarative => content,
    };
    process_str(&source, syntax, spec)
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Simple);

        let spec = ProcessingSpec::from_string("tree-yaml").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Tree);
        assert_eq!(spec.format, OutputFormat::Yaml);

        assert!(matches!(
            ProcessingSpec::from_string("invalid"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-json"),
            Err(ProcessingError::InvalidStage(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-xml"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(ProcessingSpec::from_string("token-diagram").is_err());
        assert!(ProcessingSpec::from_string("tree-simple").is_err());
    }

    #[test]
    fn test_available_formats() {
        assert_eq!(
            available_formats(),
            vec![
                "token-simple",
                "token-json",
                "tree-diagram",
                "tree-json",
                "tree-yaml",
                "tree-stats"
            ]
        );
        for format in available_formats() {
            assert!(ProcessingSpec::from_string(&format).is_ok(), "{format}");
        }
    }

    #[test]
    fn test_process_declarative_to_diagram() {
        let spec = ProcessingSpec::from_string("tree-diagram").unwrap();
        let output = process_str("app > src > main.rs", SourceSyntax::Declarative, &spec).unwrap();
        assert_eq!(output, "app/\n└── src/\n    └── main.rs\n");
    }

    #[test]
    fn test_process_tokens() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_str("a > b", SourceSyntax::Declarative, &spec).unwrap();
        assert_eq!(output, "<name:a><go-deeper><name:b>\n");
    }

    #[test]
    fn test_process_reports_parse_errors() {
        let spec = ProcessingSpec::from_string("tree-json").unwrap();
        let err = process_str("a > b | | c", SourceSyntax::Declarative, &spec).unwrap_err();
        assert!(matches!(err, ProcessingError::Tree(Error::Parse(_))));

        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let err = process_str("a > d(b", SourceSyntax::Declarative, &spec).unwrap_err();
        assert!(matches!(err, ProcessingError::Tree(Error::Lex(_))));
    }

    #[test]
    fn test_process_markdown_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "# Layout\n\n```\napp/\n├── a.md\n└── b.md\n```\n").unwrap();

        let spec = ProcessingSpec::from_string("tree-stats").unwrap();
        let output = process_file(file.path(), SourceSyntax::Diagram, &spec).unwrap();
        assert_eq!(output, "directories: 1\nfiles: 2\n  .md: 2\n");
    }

    #[test]
    fn test_process_missing_file() {
        let spec = ProcessingSpec::from_string("tree-diagram").unwrap();
        let err = process_file("/definitely/not/here.md", SourceSyntax::Diagram, &spec).unwrap_err();
        assert!(matches!(err, ProcessingError::Io(SourceError::Io { .. })));
    }
}
