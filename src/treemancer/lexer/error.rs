//! Errors raised while scanning declarative syntax

use crate::treemancer::ast::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// `d(` or `f(` whose matching `)` never comes inside the word
    #[error("unterminated `{hint}(` hint at {position}")]
    UnterminatedHint {
        hint: char,
        offset: usize,
        position: Position,
    },
    /// `)` with no open parenthesis or hint before it
    #[error("unmatched `)` at {position}")]
    UnmatchedClose { offset: usize, position: Position },
    /// `d()` / `f()`
    #[error("empty `{hint}()` hint at {position}")]
    EmptyHint {
        hint: char,
        offset: usize,
        position: Position,
    },
    /// Control characters are not allowed in names
    #[error("illegal character {ch:?} at {position}")]
    IllegalCharacter {
        ch: char,
        offset: usize,
        position: Position,
    },
}

impl LexError {
    /// Byte offset of the offending character
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedHint { offset, .. }
            | LexError::UnmatchedClose { offset, .. }
            | LexError::EmptyHint { offset, .. }
            | LexError::IllegalCharacter { offset, .. } => *offset,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedHint { position, .. }
            | LexError::UnmatchedClose { position, .. }
            | LexError::EmptyHint { position, .. }
            | LexError::IllegalCharacter { position, .. } => *position,
        }
    }

    /// The character found at [`offset`](Self::offset)
    pub fn character(&self) -> char {
        match self {
            LexError::UnterminatedHint { hint, .. } | LexError::EmptyHint { hint, .. } => *hint,
            LexError::UnmatchedClose { .. } => ')',
            LexError::IllegalCharacter { ch, .. } => *ch,
        }
    }
}
