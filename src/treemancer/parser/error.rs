//! Structural errors raised by both parsers
//!
//! Declarative errors point at a byte offset and its line/column position.
//! Diagram errors point at a one-based line number, which is what people see
//! when they look at a diagram.

use crate::treemancer::ast::Position;
use crate::treemancer::lexer::diagram::PrefixStyle;
use crate::treemancer::lexer::TokenKind;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("input contains no entry names")]
    NoRoot,

    /// `>` with nothing to descend into or nothing after it
    #[error("dangling `>` at {position}")]
    DanglingOperator { offset: usize, position: Position },

    /// `|` while already at the top level
    #[error("`|` at {position} climbs above the root")]
    CascadeUnderflow { offset: usize, position: Position },

    #[error("second top-level entry `{name}` at {position}; a tree has exactly one root")]
    MultipleRoots {
        name: String,
        offset: usize,
        position: Position,
    },

    #[error("`{name}` is marked as a file and cannot have children (at {position})")]
    ChildrenUnderFile {
        name: String,
        offset: usize,
        position: Position,
    },

    /// A name a diagram would read back as something else
    #[error("name `{name}` at {position} would not survive as a diagram entry")]
    InvalidName {
        name: String,
        offset: usize,
        position: Position,
    },

    #[error("unexpected {found} at {position}")]
    UnexpectedToken {
        found: TokenKind,
        offset: usize,
        position: Position,
    },

    #[error("inconsistent indentation on line {line}: {reason}")]
    InconsistentIndent { line: usize, reason: IndentIssue },

    #[error("line {line} uses {found} prefixes but the tree uses {expected} prefixes")]
    MixedStyles {
        line: usize,
        expected: PrefixStyle,
        found: PrefixStyle,
    },

    #[error("no tree entries found (line {line})")]
    EmptyTree { line: usize },
}

impl ParseError {
    /// One-based line of the error, when the error has one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::DanglingOperator { position, .. }
            | ParseError::CascadeUnderflow { position, .. }
            | ParseError::MultipleRoots { position, .. }
            | ParseError::ChildrenUnderFile { position, .. }
            | ParseError::InvalidName { position, .. }
            | ParseError::UnexpectedToken { position, .. } => Some(position.line + 1),
            ParseError::InconsistentIndent { line, .. }
            | ParseError::MixedStyles { line, .. }
            | ParseError::EmptyTree { line } => Some(*line),
            ParseError::EmptyInput | ParseError::NoRoot => None,
        }
    }
}

/// Why a diagram line's depth could not be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentIssue {
    /// Prefix width is not a whole number of indentation units
    PartialUnit { width: usize, unit: usize },
    /// More than one level deeper than the previous entry
    Jump { from: usize, to: usize },
    /// Shallower than the first entry of the block
    AboveRoot,
    /// Tabs and spaces both used for indentation
    MixedWhitespace,
}

impl fmt::Display for IndentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentIssue::PartialUnit { width, unit } => {
                write!(f, "width {width} is not a multiple of the unit {unit}")
            }
            IndentIssue::Jump { from, to } => write!(f, "jumps from depth {from} to depth {to}"),
            IndentIssue::AboveRoot => f.write_str("entry is shallower than the tree root"),
            IndentIssue::MixedWhitespace => f.write_str("tabs and spaces are mixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParseError::CascadeUnderflow {
            offset: 8,
            position: Position::new(0, 8),
        };
        assert_eq!(err.to_string(), "`|` at 1:9 climbs above the root");
        assert_eq!(err.line(), Some(1));

        let err = ParseError::InconsistentIndent {
            line: 3,
            reason: IndentIssue::PartialUnit { width: 3, unit: 4 },
        };
        assert_eq!(
            err.to_string(),
            "inconsistent indentation on line 3: width 3 is not a multiple of the unit 4"
        );

        let err = ParseError::MixedStyles {
            line: 2,
            expected: PrefixStyle::Connector,
            found: PrefixStyle::Bullet,
        };
        assert_eq!(
            err.to_string(),
            "line 2 uses bullet prefixes but the tree uses connector prefixes"
        );
        assert_eq!(ParseError::EmptyInput.line(), None);
    }
}
