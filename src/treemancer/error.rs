//! Crate-level error type
//!
//! Each stage has its own error enum; [`Error`] wraps them so a pipeline can
//! use `?` across stages.

use crate::treemancer::formats::diagram::SerializeError;
use crate::treemancer::lexer::LexError;
use crate::treemancer::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl Error {
    /// True for errors caused by malformed input text, as opposed to misuse of the API
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::Lex(_) | Error::Parse(_))
    }
}
