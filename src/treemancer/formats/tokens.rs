//! Token stream dumps, mostly for debugging the lexers

use super::registry::FormatError;
use crate::treemancer::ast::SourceLocation;
use crate::treemancer::lexer::{Token, TokenKind};

/// `<kind:text>` per token, one output line per source line. `Eof` is omitted.
pub fn to_simple(tokens: &[Token], source: &str) -> String {
    let locator = SourceLocation::new(source);
    let mut result = String::new();
    let mut current_line = 0;

    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let line = locator.byte_to_position(token.span.start).line;
        if line != current_line && !result.is_empty() && !result.ends_with('\n') {
            result.push('\n');
        }
        current_line = line;

        result.push_str(&token.to_string());
        if matches!(token.kind, TokenKind::Newline | TokenKind::BlankLine) {
            result.push('\n');
        }
    }

    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    result
}

pub fn to_json(tokens: &[Token]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tokens).map_err(|e| FormatError::SerializationError(e.to_string()))
}
