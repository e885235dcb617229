//! Parser for ASCII tree diagrams
//!
//! Entries are grouped into blocks separated by blank lines. Within a block
//! every line's depth is measured from its structural prefix:
//!
//! - connector lines (`├── `, `|-- `, ...) sit one level below whatever their
//!   continuation columns cover, and the first connector's width is the unit
//! - bullet and indentation lines use the first non-zero indentation as the
//!   unit; bullets sit one level down when the block starts with a bare line
//! - the first line's indentation is common to the whole block and removed
//!
//! The depth of the block's first line is the root depth. Each line at that
//! depth starts a new tree; deeper lines attach to the "spine", the last node
//! seen at each depth.

use super::error::{IndentIssue, ParseError};
use super::TreeParser;
use crate::treemancer::ast::{KindOrigin, Node, NodeId, NodeKind, SourceLocation, TreeArena};
use crate::treemancer::error::Error;
use crate::treemancer::lexer::diagram::{classify_prefix, PrefixShape, PrefixStyle};
use crate::treemancer::lexer::{tokenize_diagram, Token, TokenKind};
use tracing::debug;

/// Parser for `tree`-style diagrams, bullet lists and indented outlines
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramParser;

impl DiagramParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every tree of every block, in source order.
    pub fn parse_all(&self, source: &str) -> Result<Vec<Node>, Error> {
        let blocks = read_blocks(source)?;
        let mut trees = Vec::new();
        for block in &blocks {
            trees.extend(BlockParser::new(block).run()?);
        }
        debug!(blocks = blocks.len(), trees = trees.len(), "parsed diagram");
        Ok(trees)
    }
}

impl TreeParser for DiagramParser {
    fn name(&self) -> &'static str {
        "diagram"
    }

    /// Parse the first tree of the first block; later blocks are not read.
    fn parse(&self, source: &str) -> Result<Node, Error> {
        let blocks = read_blocks(source)?;
        let first = &blocks[0];
        let tree = BlockParser::new(first)
            .run()?
            .into_iter()
            .next()
            .ok_or(ParseError::EmptyTree {
                line: first[0].line,
            })?;
        debug!(
            blocks = blocks.len(),
            directories = tree.count_directories(),
            files = tree.count_files(),
            "parsed first diagram tree"
        );
        Ok(tree)
    }
}

/// One diagram line holding an entry
#[derive(Debug)]
struct Entry<'a> {
    /// One-based
    line: usize,
    prefix: &'a str,
    name: &'a str,
    dir_marker: bool,
}

/// Group entry lines into blocks. Never returns an empty block or an empty list.
fn read_blocks(source: &str) -> Result<Vec<Vec<Entry<'_>>>, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let tokens = tokenize_diagram(source);
    let locator = SourceLocation::new(source);
    debug!(tokens = tokens.len(), "tokenized diagram input");

    let mut blocks = Vec::new();
    let mut block = Vec::new();
    let mut line = 1;
    let mut prefix = "";
    let mut name: Option<&Token> = None;
    let mut dir_marker = false;

    for token in &tokens {
        match token.kind {
            TokenKind::TreePrefix => prefix = text_of(source, token),
            TokenKind::Name => name = Some(token),
            TokenKind::DirMarker => dir_marker = true,
            TokenKind::Newline | TokenKind::BlankLine => {
                if let Some(name) = name.take() {
                    block.push(Entry {
                        line,
                        prefix,
                        name: text_of(source, name),
                        dir_marker,
                    });
                }
                if token.kind == TokenKind::BlankLine && !block.is_empty() {
                    blocks.push(std::mem::take(&mut block));
                }
                prefix = "";
                dir_marker = false;
                line += 1;
            }
            TokenKind::Eof => break,
            found => {
                return Err(ParseError::UnexpectedToken {
                    found,
                    offset: token.span.start,
                    position: locator.byte_to_position(token.span.start),
                })
            }
        }
    }
    if !block.is_empty() {
        blocks.push(block);
    }

    if blocks.is_empty() {
        return Err(ParseError::EmptyTree {
            line: (line - 1).max(1),
        });
    }
    Ok(blocks)
}

/// Entry text borrows from the source, not from the token list.
fn text_of<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.clone()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Whitespace {
    Tabs,
    Spaces,
}

/// Depth bookkeeping for one block
struct BlockParser<'e, 'a> {
    entries: &'e [Entry<'a>],
    base: usize,
    root_is_bare: bool,
    style: Option<PrefixStyle>,
    unit: Option<usize>,
    whitespace: Option<Whitespace>,
}

impl<'e, 'a> BlockParser<'e, 'a> {
    fn new(entries: &'e [Entry<'a>]) -> Self {
        let first = classify_prefix(entries[0].prefix);
        Self {
            entries,
            base: first.lead_width,
            root_is_bare: matches!(first.style, PrefixStyle::Bare | PrefixStyle::Indent),
            style: None,
            unit: None,
            whitespace: None,
        }
    }

    fn run(mut self) -> Result<Vec<Node>, ParseError> {
        let mut trees = Vec::new();
        let mut current: Option<(TreeArena, Vec<NodeId>)> = None;
        let mut first_depth = None;

        for entry in self.entries {
            let depth = self.depth_of(entry)?;
            let root_depth = *first_depth.get_or_insert(depth);
            if depth < root_depth {
                return Err(indent(entry, IndentIssue::AboveRoot));
            }
            let relative = depth - root_depth;
            let fixed = entry
                .dir_marker
                .then_some((NodeKind::Directory, KindOrigin::Marker));

            if relative == 0 {
                if let Some((arena, spine)) = current.take() {
                    trees.push(arena.into_tree(spine[0]));
                }
                let mut arena = TreeArena::new();
                let root = arena.add_root(entry.name, fixed);
                current = Some((arena, vec![root]));
                continue;
            }

            let Some((arena, spine)) = current.as_mut() else {
                return Err(indent(entry, IndentIssue::AboveRoot));
            };
            if relative > spine.len() {
                return Err(indent(
                    entry,
                    IndentIssue::Jump {
                        from: spine.len() - 1,
                        to: relative,
                    },
                ));
            }
            let parent = spine[relative - 1];
            spine.truncate(relative);
            let node = arena.add_child(parent, entry.name, fixed);
            spine.push(node);
        }

        if let Some((arena, spine)) = current {
            trees.push(arena.into_tree(spine[0]));
        }
        Ok(trees)
    }

    /// Absolute depth of an entry within its block
    fn depth_of(&mut self, entry: &Entry<'_>) -> Result<usize, ParseError> {
        let shape = classify_prefix(entry.prefix);
        self.check_whitespace(entry, &shape)?;

        let lead = shape
            .lead_width
            .checked_sub(self.base)
            .ok_or_else(|| indent(entry, IndentIssue::AboveRoot))?;

        let style = match shape.style {
            PrefixStyle::Indent if lead == 0 => PrefixStyle::Bare,
            style => style,
        };

        if style != PrefixStyle::Bare {
            match self.style {
                None => self.style = Some(style),
                Some(expected) if expected != style => {
                    return Err(ParseError::MixedStyles {
                        line: entry.line,
                        expected,
                        found: style,
                    })
                }
                Some(_) => {}
            }
        }

        match style {
            PrefixStyle::Bare => Ok(0),
            PrefixStyle::Connector => {
                let unit = *self.unit.get_or_insert(shape.marker_width);
                Ok(self.levels(entry, lead, unit)? + 1)
            }
            PrefixStyle::Bullet => {
                let offset = usize::from(self.root_is_bare);
                if lead == 0 {
                    return Ok(offset);
                }
                let unit = *self.unit.get_or_insert(lead);
                Ok(self.levels(entry, lead, unit)? + offset)
            }
            PrefixStyle::Indent => {
                let unit = *self.unit.get_or_insert(lead);
                self.levels(entry, lead, unit)
            }
        }
    }

    fn levels(&self, entry: &Entry<'_>, width: usize, unit: usize) -> Result<usize, ParseError> {
        if unit == 0 || width % unit != 0 {
            return Err(indent(entry, IndentIssue::PartialUnit { width, unit }));
        }
        Ok(width / unit)
    }

    fn check_whitespace(&mut self, entry: &Entry<'_>, shape: &PrefixShape) -> Result<(), ParseError> {
        let used = match (shape.lead_has_tabs, shape.lead_has_spaces) {
            (true, true) => return Err(indent(entry, IndentIssue::MixedWhitespace)),
            (true, false) => Whitespace::Tabs,
            (false, true) => Whitespace::Spaces,
            (false, false) => return Ok(()),
        };
        match self.whitespace {
            Some(seen) if seen != used => Err(indent(entry, IndentIssue::MixedWhitespace)),
            _ => {
                self.whitespace = Some(used);
                Ok(())
            }
        }
    }
}

fn indent(entry: &Entry<'_>, reason: IndentIssue) -> ParseError {
    ParseError::InconsistentIndent {
        line: entry.line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Node, Error> {
        DiagramParser::new().parse(source)
    }

    fn parse_err(source: &str) -> ParseError {
        match DiagramParser::new().parse_all(source) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected a parse error for {source:?}, got {other:?}"),
        }
    }

    fn sample() -> Node {
        Node::directory(
            "project",
            vec![
                Node::directory("src", vec![Node::file("main.rs"), Node::file("lib.rs")]),
                Node::file("README.md"),
            ],
        )
    }

    #[test]
    fn test_box_drawing() {
        let source = "\
project/
├── src/
│   ├── main.rs
│   └── lib.rs
└── README.md
";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_ascii_connectors() {
        let source = "\
project
|-- src
|   |-- main.rs
|   `-- lib.rs
`-- README.md
";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_narrow_connectors() {
        let source = "project\n├─ src\n│  ├─ main.rs\n│  └─ lib.rs\n└─ README.md\n";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_bullets() {
        let source = "- project\n  - src\n    - main.rs\n    - lib.rs\n  - README.md\n";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_bullets_under_bare_root() {
        let source = "project\n* src\n  * main.rs\n  * lib.rs\n* README.md\n";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_indentation() {
        let source = "project\n    src\n        main.rs\n        lib.rs\n    README.md\n";
        assert_eq!(parse(source).unwrap(), sample());

        let tabs = "project\n\tsrc\n\t\tmain.rs\n\t\tlib.rs\n\tREADME.md\n";
        assert_eq!(parse(tabs).unwrap(), sample());
    }

    #[test]
    fn test_common_indentation_is_removed() {
        let source = "    project/\n    ├── src/\n    │   ├── main.rs\n    │   └── lib.rs\n    └── README.md\n";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_dir_marker_on_empty_directory() {
        let tree = parse("app/\n├── cache/\n└── main.rs\n").unwrap();
        assert_eq!(tree.children()[0], Node::directory("cache", vec![]));
        assert!(tree.children()[1].is_file());
    }

    #[test]
    fn test_decorative_lines_and_comments() {
        let source = "\
# layout
project/
├── src/      # code
│   ├── main.rs
│   └── lib.rs
│
└── README.md

2 directories, 3 files
";
        assert_eq!(parse(source).unwrap(), sample());
    }

    #[test]
    fn test_partial_unit_is_inconsistent() {
        let err = parse_err("root\n  a\n   b\n");
        assert_eq!(
            err,
            ParseError::InconsistentIndent {
                line: 3,
                reason: IndentIssue::PartialUnit { width: 3, unit: 2 },
            }
        );
    }

    #[test]
    fn test_jump_is_inconsistent() {
        let err = parse_err("root\n  a\n      b\n");
        assert_eq!(
            err,
            ParseError::InconsistentIndent {
                line: 3,
                reason: IndentIssue::Jump { from: 1, to: 3 },
            }
        );
    }

    #[test]
    fn test_above_root_is_inconsistent() {
        let err = parse_err("  root\n    a\n b\n");
        assert!(matches!(
            err,
            ParseError::InconsistentIndent { line: 3, reason: IndentIssue::AboveRoot }
        ));
    }

    #[test]
    fn test_mixed_tabs_and_spaces() {
        let err = parse_err("root\n\ta\n  b\n");
        assert!(matches!(
            err,
            ParseError::InconsistentIndent { line: 3, reason: IndentIssue::MixedWhitespace }
        ));
    }

    #[test]
    fn test_mixed_styles() {
        let err = parse_err("root\n├── a\n- b\n");
        assert_eq!(
            err,
            ParseError::MixedStyles {
                line: 3,
                expected: PrefixStyle::Connector,
                found: PrefixStyle::Bullet,
            }
        );
    }

    #[test]
    fn test_single_mode_returns_first_tree_only() {
        let source = "one/\n└── a\ntwo/\n└── b\n\nthree\n";
        let tree = parse(source).unwrap();
        assert_eq!(tree.name(), "one");
    }

    #[test]
    fn test_single_mode_ignores_later_blocks() {
        let source = "one/\n└── a\n\nroot\n  a\n   b\n";
        assert_eq!(parse(source).unwrap().name(), "one");
    }

    #[test]
    fn test_all_mode_returns_every_tree() {
        let source = "one/\n└── a\ntwo/\n└── b\n\nthree\n";
        let names: Vec<String> = DiagramParser::new()
            .parse_all(source)
            .unwrap()
            .iter()
            .map(|tree| tree.name().to_string())
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_rootless_connector_block_gives_a_forest() {
        let trees = DiagramParser::new()
            .parse_all("├── a/\n│   └── x\n└── b\n")
            .unwrap();
        assert_eq!(
            trees,
            vec![Node::directory("a", vec![Node::file("x")]), Node::file("b")]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(parse_err("  \n\n"), ParseError::EmptyInput);
        assert_eq!(parse_err("# nothing here\n│\n"), ParseError::EmptyTree { line: 2 });
    }
}
