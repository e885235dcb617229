//! Lexer for the declarative syntax
//!
//! ```text
//! project > d(src) > main.py | tests > test_main.py
//! ```
//!
//! Hint rule
//!
//!     A word is everything between separators (whitespace, `>` and `|`). A
//!     hint is recognised only when the word starts with exactly `d(` or `f(`
//!     and the parenthesis matching that opener is the last character of the
//!     word. Any other parentheses belong to a literal name, so `d(raft).txt`,
//!     `notes(v2)` and `build(1` are plain names. Since names cannot contain
//!     whitespace, neither can hints: `d(my dir)` is an unterminated hint
//!     followed by a stray `)`.

use super::error::LexError;
use super::tokens::{Token, TokenKind};
use crate::treemancer::ast::SourceLocation;
use logos::Logos;
use std::ops::Range;

/// Raw scan. Everything that is not whitespace, an operator or a parenthesis
/// is a word, so the scan itself cannot fail.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[token(">")]
    GoDeeper,

    #[token("|")]
    CascadeReset,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // Longest match makes `d(` win over the word `d` followed by `(`.
    #[token("d(")]
    DirOpen,

    #[token("f(")]
    FileOpen,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[^ \t\r\n>|()]+")]
    Word,
}

type Piece = (RawToken, Range<usize>);

/// Tokenize declarative syntax. The returned stream always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let locator = SourceLocation::new(source);
    let mut tokens = Vec::new();
    let mut word: Vec<Piece> = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let ch = source[span.start..].chars().next().unwrap_or('\0');
                return Err(LexError::IllegalCharacter {
                    ch,
                    offset: span.start,
                    position: locator.byte_to_position(span.start),
                });
            }
        };

        match raw {
            RawToken::Whitespace => flush_word(source, &locator, &mut word, &mut tokens)?,
            RawToken::GoDeeper => {
                flush_word(source, &locator, &mut word, &mut tokens)?;
                tokens.push(Token::new(TokenKind::GoDeeper, ">", span));
            }
            RawToken::CascadeReset => {
                flush_word(source, &locator, &mut word, &mut tokens)?;
                tokens.push(Token::new(TokenKind::CascadeReset, "|", span));
            }
            _ => word.push((raw, span)),
        }
    }
    flush_word(source, &locator, &mut word, &mut tokens)?;

    tokens.push(Token::new(TokenKind::Eof, "", source.len()..source.len()));
    Ok(tokens)
}

fn flush_word(
    source: &str,
    locator: &SourceLocation,
    word: &mut Vec<Piece>,
    tokens: &mut Vec<Token>,
) -> Result<(), LexError> {
    if word.is_empty() {
        return Ok(());
    }
    let classified = classify_word(source, locator, word)?;
    tokens.extend(classified);
    word.clear();
    Ok(())
}

/// Turn one word into either a single name or a `hint-open name hint-close` triple.
fn classify_word(
    source: &str,
    locator: &SourceLocation,
    pieces: &[Piece],
) -> Result<Vec<Token>, LexError> {
    let start = pieces[0].1.start;
    let end = pieces[pieces.len() - 1].1.end;
    let text = &source[start..end];

    if let Some((index, ch)) = text.char_indices().find(|(_, ch)| ch.is_control()) {
        let offset = start + index;
        return Err(LexError::IllegalCharacter {
            ch,
            offset,
            position: locator.byte_to_position(offset),
        });
    }

    let (first, first_span) = &pieces[0];
    let hint = match first {
        RawToken::DirOpen => Some(('d', TokenKind::DirHintOpen, TokenKind::DirHintClose)),
        RawToken::FileOpen => Some(('f', TokenKind::FileHintOpen, TokenKind::FileHintClose)),
        _ => None,
    };

    if let Some((letter, open_kind, close_kind)) = hint {
        match matching_close(pieces) {
            None => {
                return Err(LexError::UnterminatedHint {
                    hint: letter,
                    offset: first_span.start,
                    position: locator.byte_to_position(first_span.start),
                })
            }
            Some(close) if close == pieces.len() - 1 => {
                let close_span = pieces[close].1.clone();
                let inner = first_span.end..close_span.start;
                if inner.is_empty() {
                    return Err(LexError::EmptyHint {
                        hint: letter,
                        offset: first_span.start,
                        position: locator.byte_to_position(first_span.start),
                    });
                }
                return Ok(vec![
                    Token::new(open_kind, &source[first_span.clone()], first_span.clone()),
                    Token::new(TokenKind::Name, &source[inner.clone()], inner),
                    Token::new(close_kind, ")", close_span),
                ]);
            }
            // The hint closes before the word ends: `d(raft).txt` is a name.
            Some(_) => {}
        }
    }

    check_balanced(locator, pieces)?;
    Ok(vec![Token::new(TokenKind::Name, text, start..end)])
}

/// Index of the piece closing the opener at index 0
fn matching_close(pieces: &[Piece]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, (raw, _)) in pieces.iter().enumerate() {
        match raw {
            RawToken::DirOpen | RawToken::FileOpen | RawToken::OpenParen => depth += 1,
            RawToken::CloseParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Literal names may leave a `(` open but may not close one that was never opened.
fn check_balanced(locator: &SourceLocation, pieces: &[Piece]) -> Result<(), LexError> {
    let mut depth = 0usize;
    for (raw, span) in pieces {
        match raw {
            RawToken::DirOpen | RawToken::FileOpen | RawToken::OpenParen => depth += 1,
            RawToken::CloseParen if depth == 0 => {
                return Err(LexError::UnmatchedClose {
                    offset: span.start,
                    position: locator.byte_to_position(span.start),
                })
            }
            RawToken::CloseParen => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}
