//! Parsers for both input languages
//!
//! [`DeclarativeParser`] and [`DiagramParser`] share nothing but their output:
//! each implements [`TreeParser`] and returns a finished [`Node`] tree with
//! every kind resolved. [`SourceSyntax`] picks one at run time.

pub mod declarative;
pub mod diagram;
pub mod error;

pub use declarative::DeclarativeParser;
pub use diagram::DiagramParser;
pub use error::{IndentIssue, ParseError};

use crate::treemancer::ast::Node;
use crate::treemancer::error::Error;
use std::fmt;
use std::str::FromStr;

/// A parser turning source text into one tree
pub trait TreeParser: Send + Sync {
    /// Short name used in logs and messages
    fn name(&self) -> &'static str;

    fn parse(&self, source: &str) -> Result<Node, Error>;
}

/// The two input languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSyntax {
    Declarative,
    Diagram,
}

impl SourceSyntax {
    pub fn parser(self) -> Box<dyn TreeParser> {
        match self {
            SourceSyntax::Declarative => Box::new(DeclarativeParser::new()),
            SourceSyntax::Diagram => Box::new(DiagramParser::new()),
        }
    }

    pub fn parse(self, source: &str) -> Result<Node, Error> {
        self.parser().parse(source)
    }

    /// Guess the syntax of a piece of text: multi-line text or text holding
    /// tree graphics is a diagram, anything else is declarative.
    pub fn detect(source: &str) -> SourceSyntax {
        let trimmed = source.trim();
        let has_graphics = trimmed.contains(['├', '└', '│']) || trimmed.contains("|--");
        if has_graphics || (trimmed.lines().count() > 1 && !trimmed.contains('>')) {
            SourceSyntax::Diagram
        } else {
            SourceSyntax::Declarative
        }
    }
}

impl fmt::Display for SourceSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSyntax::Declarative => write!(f, "declarative"),
            SourceSyntax::Diagram => write!(f, "diagram"),
        }
    }
}

impl FromStr for SourceSyntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "declarative" | "syntax" => Ok(SourceSyntax::Declarative),
            "diagram" | "tree" => Ok(SourceSyntax::Diagram),
            _ => Err(format!(
                "Unknown syntax: '{}'. Expected 'declarative' or 'diagram'",
                s
            )),
        }
    }
}

/// Parse declarative syntax with the default parser.
pub fn parse_declarative(source: &str) -> Result<Node, Error> {
    DeclarativeParser::new().parse(source)
}

/// Parse the first tree of a diagram with the default parser.
pub fn parse_diagram(source: &str) -> Result<Node, Error> {
    DiagramParser::new().parse(source)
}
