//! Token model shared by the declarative and diagram lexers

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Every kind of token either lexer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// An entry name, possibly with an extension
    Name,
    /// `>`
    GoDeeper,
    /// `|`
    CascadeReset,
    /// `d(`
    DirHintOpen,
    /// `)` closing a `d(` hint
    DirHintClose,
    /// `f(`
    FileHintOpen,
    /// `)` closing an `f(` hint
    FileHintClose,
    /// Structural prefix of a diagram line: tree graphics, bullet or indentation
    TreePrefix,
    /// Trailing `/` on a diagram entry
    DirMarker,
    /// End of a non-blank diagram line
    Newline,
    /// A diagram line holding only whitespace
    BlankLine,
    Eof,
}

impl TokenKind {
    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::GoDeeper | TokenKind::CascadeReset)
    }

    fn label(self) -> &'static str {
        match self {
            TokenKind::Name => "name",
            TokenKind::GoDeeper => "go-deeper",
            TokenKind::CascadeReset => "cascade-reset",
            TokenKind::DirHintOpen => "dir-hint-open",
            TokenKind::DirHintClose => "dir-hint-close",
            TokenKind::FileHintOpen => "file-hint-open",
            TokenKind::FileHintClose => "file-hint-close",
            TokenKind::TreePrefix => "tree-prefix",
            TokenKind::DirMarker => "dir-marker",
            TokenKind::Newline => "newline",
            TokenKind::BlankLine => "blank-line",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token with the literal text it was read from and its byte range in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Name
    }
}

impl fmt::Display for Token {
    /// `<name:main.py>` for tokens whose text matters, `<go-deeper>` otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Name | TokenKind::TreePrefix => write!(f, "<{}:{}>", self.kind, self.text),
            _ => write!(f, "<{}>", self.kind),
        }
    }
}
