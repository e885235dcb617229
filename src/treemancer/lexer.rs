//! Lexers for both input languages
//!
//! The declarative lexer runs in two stages. Logos does the raw scan into
//! operators, whitespace, parentheses and bare words; a classification pass
//! then groups adjacent words and parentheses into one name each and decides
//! whether a `d(` / `f(` really opens a type hint. Keeping the hint rule out of
//! the logos grammar means the scanner stays a vanilla derive and every hint
//! decision is made in one place with the whole word in view.
//!
//! The diagram lexer is line based: each line is split into its structural
//! prefix (tree graphics, bullet or indentation), the entry name, and an
//! optional directory marker. Measuring depth from the prefix is left to the
//! diagram parser.

pub mod declarative;
pub mod diagram;
pub mod error;
pub mod tokens;

pub use declarative::tokenize as tokenize_declarative;
pub use diagram::tokenize as tokenize_diagram;
pub use error::LexError;
pub use tokens::{Token, TokenKind};
