//! Line-based lexer for ASCII tree diagrams
//!
//! Every line becomes `TreePrefix? Name? DirMarker? Newline`, or a single
//! `BlankLine`. The stream ends with `Eof`. Nothing here can fail: a line that
//! does not look like a tree entry is still read as a bare name, and it is the
//! parser's job to decide whether the resulting depths make sense.
//!
//! Lines that carry no entry (a lone `│`, a comment, the `N directories, M
//! files` footer printed by `tree`) still produce their `Newline`, so the
//! parser can count lines by counting terminators.

use super::tokens::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Tree graphics: optional continuation columns, then a connector and its padding.
/// A connector glued to text (`` `-x ``) is part of a name, not a connector.
static GRAPHIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<lead>[│|\s]*?)(?P<conn>[├└|`+\\](?:─+|-+))(?:[ \t\u{a0}]+|$)")
        .expect("graphic prefix regex is valid")
});

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<lead>\s*)(?P<bullet>[-*+])\s+").expect("bullet prefix regex is valid")
});

static INDENT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*").expect("indent prefix regex is valid"));

static REPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+ director(?:y|ies)(?:, \d+ files?)?\s*$").expect("report regex is valid")
});

static INLINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+#.*$").expect("comment regex is valid"));

/// `# heading` and a lone `#` are comments; `#notes` is a name.
static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+(?:\s|$)").expect("line comment regex is valid"));

/// What introduces an entry on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixStyle {
    /// No prefix at all
    Bare,
    /// `├──`, `└──`, `|--`, `` `-- `` and friends
    Connector,
    /// `-`, `*` or `+` followed by whitespace
    Bullet,
    /// Whitespace only
    Indent,
}

impl std::fmt::Display for PrefixStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PrefixStyle::Bare => "bare",
            PrefixStyle::Connector => "connector",
            PrefixStyle::Bullet => "bullet",
            PrefixStyle::Indent => "indentation",
        };
        f.write_str(label)
    }
}

/// Measurements of a structural prefix, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixShape {
    pub style: PrefixStyle,
    /// Width of everything before the connector or bullet
    pub lead_width: usize,
    /// Width of the connector or bullet including its padding
    pub marker_width: usize,
    pub lead_has_tabs: bool,
    pub lead_has_spaces: bool,
}

/// Measure a prefix as produced in a [`TokenKind::TreePrefix`] token.
pub fn classify_prefix(prefix: &str) -> PrefixShape {
    let (style, lead, marker) = if let Some(caps) = GRAPHIC_PREFIX.captures(prefix) {
        let lead = caps.name("lead").map_or("", |m| m.as_str());
        (PrefixStyle::Connector, lead, &prefix[lead.len()..])
    } else if let Some(caps) = BULLET_PREFIX.captures(prefix) {
        let lead = caps.name("lead").map_or("", |m| m.as_str());
        (PrefixStyle::Bullet, lead, &prefix[lead.len()..])
    } else if prefix.is_empty() {
        (PrefixStyle::Bare, "", "")
    } else {
        (PrefixStyle::Indent, prefix, "")
    };

    PrefixShape {
        style,
        lead_width: lead.chars().count(),
        marker_width: marker.chars().count(),
        lead_has_tabs: lead.contains('\t'),
        lead_has_spaces: lead.contains(' ') || lead.contains('\u{a0}'),
    }
}

fn is_decorative(line: &str) -> bool {
    line.chars().any(|c| c == '│' || c == '|')
        && line.chars().all(|c| c == '│' || c == '|' || c.is_whitespace())
}

fn structural_prefix(line: &str) -> usize {
    GRAPHIC_PREFIX
        .find(line)
        .or_else(|| BULLET_PREFIX.find(line))
        .or_else(|| INDENT_PREFIX.find(line))
        .map_or(0, |m| m.end())
}

/// Whether `name` survives being written into a diagram, both as the root line
/// and behind a connector, and read back unchanged.
pub fn reads_as_name(name: &str) -> bool {
    let reads_back = |line: String, expected: &[TokenKind]| {
        let tokens = tokenize(&line);
        tokens.len() == expected.len()
            && tokens.iter().zip(expected).all(|(token, kind)| token.kind == *kind)
            && tokens.iter().any(|token| token.kind == TokenKind::Name && token.text == name)
    };

    !name.contains(['\n', '\r'])
        && reads_back(
            name.to_string(),
            &[TokenKind::Name, TokenKind::Newline, TokenKind::Eof],
        )
        && reads_back(
            format!("└── {name}"),
            &[TokenKind::TreePrefix, TokenKind::Name, TokenKind::Newline, TokenKind::Eof],
        )
}

/// Tokenize diagram text.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line_start = 0;
    let mut pieces = source.split('\n').peekable();

    while let Some(raw_line) = pieces.next() {
        let is_last = pieces.peek().is_none();
        if is_last && raw_line.is_empty() {
            break;
        }
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        tokenize_line(line, line_start, &mut tokens);
        line_start += raw_line.len() + 1;
    }

    tokens.push(Token::new(TokenKind::Eof, "", source.len()..source.len()));
    tokens
}

fn tokenize_line(line: &str, start: usize, tokens: &mut Vec<Token>) {
    let end = start + line.len();

    if line.trim().is_empty() || REPORT_LINE.is_match(line) {
        tokens.push(Token::new(TokenKind::BlankLine, "", start..end));
        return;
    }

    if is_decorative(line) {
        tokens.push(Token::new(TokenKind::TreePrefix, line, start..end));
        tokens.push(Token::new(TokenKind::Newline, "", end..end));
        return;
    }

    let prefix_len = structural_prefix(line);
    if prefix_len > 0 {
        tokens.push(Token::new(
            TokenKind::TreePrefix,
            &line[..prefix_len],
            start..start + prefix_len,
        ));
    }

    let rest = &line[prefix_len..];
    if !LINE_COMMENT.is_match(rest) {
        let content = INLINE_COMMENT
            .find(rest)
            .map_or(rest, |m| &rest[..m.start()])
            .trim_end();
        let name = content.trim_end_matches('/');
        if !name.is_empty() {
            let name_start = start + prefix_len;
            let name_end = name_start + name.len();
            tokens.push(Token::new(TokenKind::Name, name, name_start..name_end));
            if name.len() < content.len() {
                let marker_end = name_start + content.len();
                tokens.push(Token::new(TokenKind::DirMarker, "/", name_end..marker_end));
            }
        }
    }

    tokens.push(Token::new(TokenKind::Newline, "", end..end));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(source: &str) -> Vec<String> {
        tokenize(source).iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_box_drawing_lines() {
        let source = "project/\n├── src/\n│   └── main.rs\n└── README.md\n";
        assert_eq!(
            summary(source),
            vec![
                "<name:project>",
                "<dir-marker>",
                "<newline>",
                "<tree-prefix:├── >",
                "<name:src>",
                "<dir-marker>",
                "<newline>",
                "<tree-prefix:│   └── >",
                "<name:main.rs>",
                "<newline>",
                "<tree-prefix:└── >",
                "<name:README.md>",
                "<newline>",
                "<eof>",
            ]
        );
    }

    #[test]
    fn test_ascii_connectors() {
        for (line, prefix) in [
            ("|-- a", "|-- "),
            ("`-- a", "`-- "),
            ("+-- a", "+-- "),
            ("\\-- a", "\\-- "),
            ("|   `-- a", "|   `-- "),
            ("├─ a", "├─ "),
        ] {
            let tokens = tokenize(line);
            assert_eq!(tokens[0].kind, TokenKind::TreePrefix, "{line}");
            assert_eq!(tokens[0].text, prefix, "{line}");
            assert_eq!(tokens[1].text, "a", "{line}");
        }
    }

    #[test]
    fn test_bullets_and_indentation() {
        assert_eq!(
            summary("- app\n  * src\n\tlib"),
            vec![
                "<tree-prefix:- >",
                "<name:app>",
                "<newline>",
                "<tree-prefix:  * >",
                "<name:src>",
                "<newline>",
                "<tree-prefix:\t>",
                "<name:lib>",
                "<newline>",
                "<eof>",
            ]
        );
    }

    #[test]
    fn test_blank_and_report_lines() {
        let kinds: Vec<TokenKind> = tokenize("a\n\n  \nb\n\n2 directories, 3 files\n")
            .into_iter()
            .map(|t| t.kind)
            .collect();
        use TokenKind::*;
        assert_eq!(
            kinds,
            vec![Name, Newline, BlankLine, BlankLine, Name, Newline, BlankLine, BlankLine, Eof]
        );
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(
            summary("├── main.rs  # entry point\n# heading\n"),
            vec!["<tree-prefix:├── >", "<name:main.rs>", "<newline>", "<newline>", "<eof>"]
        );
    }

    #[test]
    fn test_hash_inside_name_is_kept() {
        assert_eq!(tokenize("c#notes")[0].text, "c#notes");
    }

    #[test]
    fn test_hash_opens_a_comment_only_before_whitespace() {
        assert_eq!(
            summary("#notes#\n├── #todo\n#\n## Layout\n"),
            vec![
                "<name:#notes#>",
                "<newline>",
                "<tree-prefix:├── >",
                "<name:#todo>",
                "<newline>",
                "<newline>",
                "<newline>",
                "<eof>",
            ]
        );
    }

    #[test]
    fn test_connector_glued_to_text_is_a_name() {
        for line in ["`-x", "+-x", "\\-x", "|-x"] {
            let tokens = tokenize(line);
            assert_eq!(tokens[0].kind, TokenKind::Name, "{line}");
            assert_eq!(tokens[0].text, line);
        }
        assert_eq!(summary("└──"), vec!["<tree-prefix:└──>", "<newline>", "<eof>"]);
    }

    #[test]
    fn test_reads_as_name() {
        for name in ["main.rs", "#notes", "`-x", "+-x", "\\-x", "--flag", "a#b", "│x"] {
            assert!(reads_as_name(name), "{name:?}");
        }
        for name in [
            "#",
            "# x",
            "+-",
            "├──",
            "│",
            "\u{a0}x",
            "x\u{a0}",
            "a\u{a0}#b",
            "x/",
            "/",
            "- x",
            "2 directories",
        ] {
            assert!(!reads_as_name(name), "{name:?}");
        }
    }

    #[test]
    fn test_decorative_continuation_line() {
        assert_eq!(summary("│\n"), vec!["<tree-prefix:│>", "<newline>", "<eof>"]);
    }

    #[test]
    fn test_crlf_and_spans() {
        let tokens = tokenize("a/\r\n└── b\r\n");
        assert_eq!(tokens[0].span, 0..1);
        assert_eq!(tokens[1].span, 1..2);
        assert_eq!(tokens[4].text, "b");
        let b_start = "a/\r\n└── ".len();
        assert_eq!(tokens[4].span, b_start..b_start + 1);
    }

    #[test]
    fn test_nbsp_padding_from_tree_output() {
        let tokens = tokenize("├──\u{a0}main.rs");
        assert_eq!(tokens[1].text, "main.rs");
        assert_eq!(classify_prefix(&tokens[0].text).marker_width, 4);
    }

    #[test]
    fn test_classify_prefix() {
        let shape = classify_prefix("│   ├── ");
        assert_eq!(shape.style, PrefixStyle::Connector);
        assert_eq!(shape.lead_width, 4);
        assert_eq!(shape.marker_width, 4);

        let shape = classify_prefix("    - ");
        assert_eq!(shape.style, PrefixStyle::Bullet);
        assert_eq!(shape.lead_width, 4);
        assert!(shape.lead_has_spaces);
        assert!(!shape.lead_has_tabs);

        let shape = classify_prefix("\t\t");
        assert_eq!(shape.style, PrefixStyle::Indent);
        assert_eq!(shape.lead_width, 2);
        assert!(shape.lead_has_tabs);

        assert_eq!(classify_prefix("").style, PrefixStyle::Bare);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(summary(""), vec!["<eof>"]);
    }
}
