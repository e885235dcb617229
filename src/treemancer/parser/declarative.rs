//! Parser for the declarative syntax
//!
//! The parser is a small state machine over an explicit stack of frames. A
//! frame is the node new names are attached to; the bottom frame is a
//! synthetic top level that only ever holds the root.
//!
//! - a name creates a node under the top frame
//! - `>` pushes the most recently created child of the top frame
//! - `|` pops one frame, and is an error at the top level
//!
//! Kinds are left open while reading, except for `d(..)`, `f(..)` and a
//! trailing `/`, and are resolved bottom-up once the whole input is consumed.

use super::error::ParseError;
use super::TreeParser;
use crate::treemancer::ast::{KindOrigin, Node, NodeId, NodeKind, SourceLocation, TreeArena};
use crate::treemancer::error::Error;
use crate::treemancer::formats::diagram::to_diagram;
use crate::treemancer::lexer::diagram::reads_as_name;
use crate::treemancer::lexer::{tokenize_declarative, Token, TokenKind};
use tracing::debug;

/// Parser for `project > src > main.py | tests` style input
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarativeParser;

impl DeclarativeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse declarative syntax and render the result as a diagram.
    pub fn to_diagram(&self, source: &str) -> Result<String, Error> {
        let tree = self.parse(source)?;
        Ok(to_diagram(&tree))
    }
}

impl TreeParser for DeclarativeParser {
    fn name(&self) -> &'static str {
        "declarative"
    }

    fn parse(&self, source: &str) -> Result<Node, Error> {
        if source.trim().is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let tokens = tokenize_declarative(source)?;
        debug!(tokens = tokens.len(), "tokenized declarative input");

        if !tokens.iter().any(Token::is_name) {
            return Err(ParseError::NoRoot.into());
        }

        let tree = Builder::new(source, &tokens).run()?;
        debug!(
            directories = tree.count_directories(),
            files = tree.count_files(),
            "parsed declarative tree"
        );
        Ok(tree)
    }
}

/// Parsing state for one input
struct Builder<'a> {
    tokens: &'a [Token],
    locator: SourceLocation,
    arena: TreeArena,
    /// `None` is the synthetic top-level frame
    stack: Vec<Option<NodeId>>,
    root: Option<NodeId>,
    cursor: usize,
}

impl<'a> Builder<'a> {
    fn new(source: &str, tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            locator: SourceLocation::new(source),
            arena: TreeArena::new(),
            stack: vec![None],
            root: None,
            cursor: 0,
        }
    }

    fn run(mut self) -> Result<Node, ParseError> {
        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::Name => {
                    let (name, fixed) = strip_marker(&token.text);
                    self.attach(name, fixed, token)?;
                }
                TokenKind::DirHintOpen => self.hinted(NodeKind::Directory, TokenKind::DirHintClose)?,
                TokenKind::FileHintOpen => self.hinted(NodeKind::File, TokenKind::FileHintClose)?,
                TokenKind::GoDeeper => self.go_deeper(token)?,
                TokenKind::CascadeReset => self.cascade_reset(token)?,
                TokenKind::Eof => break,
                found => return Err(self.unexpected(found, token)),
            }
        }

        let root = self.root.ok_or(ParseError::NoRoot)?;
        debug!(nodes = self.arena.len(), "structure complete, inferring kinds");
        Ok(self.arena.into_tree(root))
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.cursor)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn top(&self) -> Option<NodeId> {
        self.stack.last().copied().flatten()
    }

    /// `d(name)` / `f(name)`: the open token is already consumed
    fn hinted(&mut self, kind: NodeKind, close: TokenKind) -> Result<(), ParseError> {
        let name = self.expect(TokenKind::Name)?;
        self.expect(close)?;
        self.attach(&name.text, Some((kind, KindOrigin::Hint)), name)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.unexpected(token.kind, token)),
            None => Err(ParseError::UnexpectedToken {
                found: TokenKind::Eof,
                offset: 0,
                position: Default::default(),
            }),
        }
    }

    fn attach(
        &mut self,
        name: &str,
        fixed: Option<(NodeKind, KindOrigin)>,
        token: &Token,
    ) -> Result<(), ParseError> {
        if !reads_as_name(name) {
            return Err(ParseError::InvalidName {
                name: name.to_string(),
                offset: token.span.start,
                position: self.locator.byte_to_position(token.span.start),
            });
        }

        match self.top() {
            Some(parent) => {
                self.arena.add_child(parent, name, fixed);
            }
            None if self.root.is_some() => {
                return Err(ParseError::MultipleRoots {
                    name: name.to_string(),
                    offset: token.span.start,
                    position: self.locator.byte_to_position(token.span.start),
                })
            }
            None => self.root = Some(self.arena.add_root(name, fixed)),
        }
        Ok(())
    }

    fn go_deeper(&mut self, token: &Token) -> Result<(), ParseError> {
        let dangling = || ParseError::DanglingOperator {
            offset: token.span.start,
            position: self.locator.byte_to_position(token.span.start),
        };

        let next = self.peek_kind();
        if next == TokenKind::Eof || next.is_operator() {
            return Err(dangling());
        }

        let target = match self.top() {
            Some(frame) => self.arena.last_child(frame),
            None => self.root,
        };
        let target = target.ok_or_else(dangling)?;

        let node = self.arena.get(target);
        if node.kind == Some(NodeKind::File) {
            return Err(ParseError::ChildrenUnderFile {
                name: node.name.clone(),
                offset: token.span.start,
                position: self.locator.byte_to_position(token.span.start),
            });
        }

        self.stack.push(Some(target));
        Ok(())
    }

    fn cascade_reset(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.stack.len() == 1 {
            return Err(ParseError::CascadeUnderflow {
                offset: token.span.start,
                position: self.locator.byte_to_position(token.span.start),
            });
        }
        self.stack.pop();
        Ok(())
    }

    fn unexpected(&self, found: TokenKind, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            found,
            offset: token.span.start,
            position: self.locator.byte_to_position(token.span.start),
        }
    }
}

/// `src/` names a directory, and so does `src//`.
fn strip_marker(text: &str) -> (&str, Option<(NodeKind, KindOrigin)>) {
    match text.trim_end_matches('/') {
        name if name.is_empty() || name.len() == text.len() => (text, None),
        name => (name, Some((NodeKind::Directory, KindOrigin::Marker))),
    }
}
