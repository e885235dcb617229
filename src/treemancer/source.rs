//! Getting parseable text out of files and command-line arguments
//!
//! Diagrams usually live inside Markdown, so files are scanned for fenced code
//! blocks first. A `from-syntax` argument is either inline declarative syntax
//! or the path of a `.tree` template holding it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(```+|~~~+)").expect("fence regex is valid")
});

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Path exists but is not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Template file is empty: {}", .0.display())]
    EmptyTemplate(PathBuf),
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a piece of syntax came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxInput {
    Inline(String),
    Template { path: PathBuf, content: String },
}

impl SyntaxInput {
    pub fn text(&self) -> &str {
        match self {
            SyntaxInput::Inline(text) => text,
            SyntaxInput::Template { content, .. } => content,
        }
    }
}

/// Bodies of all fenced code blocks joined by blank lines, or the whole content
/// when it has no fences.
///
/// An unclosed fence runs to the end of the content. Blank lines inside a fence
/// are kept, so separate diagrams inside one block stay separate trees.
pub fn extract_diagram_text(content: &str) -> String {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut open: Option<(char, usize)> = None;

    for line in content.lines() {
        match (open, fence_of(line)) {
            (None, Some(fence)) => {
                open = Some(fence);
                blocks.push(Vec::new());
            }
            (Some((ch, len)), Some((close_ch, close_len)))
                if close_ch == ch && close_len >= len && is_bare_fence(line) =>
            {
                open = None;
            }
            (Some(_), _) => {
                if let Some(block) = blocks.last_mut() {
                    block.push(line);
                }
            }
            (None, None) => {}
        }
    }

    if blocks.is_empty() {
        return content.to_string();
    }
    debug!(blocks = blocks.len(), "extracted fenced code blocks");

    let mut text = blocks
        .iter()
        .map(|block| block.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');
    text
}

/// Fence character and run length of a fence line
fn fence_of(line: &str) -> Option<(char, usize)> {
    let found = FENCE.captures(line)?.get(1)?.as_str();
    let ch = found.chars().next()?;
    Some((ch, found.chars().count()))
}

/// A closing fence carries no info string.
fn is_bare_fence(line: &str) -> bool {
    line.trim().chars().all(|c| c == '`' || c == '~')
}

/// Read a file and pull the diagram text out of it.
pub fn read_diagram_file(path: &Path) -> Result<String, SourceError> {
    let content = read(path)?;
    Ok(extract_diagram_text(&content))
}

/// Decide whether `arg` is inline syntax or a template path, and load it.
///
/// The argument is a path when it has no operators or whitespace and either
/// contains a path separator or a `.` (without starting with a `d(`/`f(`
/// hint), or whenever it names something that exists on disk.
pub fn resolve_syntax_input(arg: &str) -> Result<SyntaxInput, SourceError> {
    let path = Path::new(arg);
    if !looks_like_path(arg) && !path.exists() {
        return Ok(SyntaxInput::Inline(arg.to_string()));
    }

    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SourceError::NotAFile(path.to_path_buf()));
    }

    let content = read(path)?.trim().to_string();
    if content.is_empty() {
        return Err(SourceError::EmptyTemplate(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loaded syntax template");
    Ok(SyntaxInput::Template {
        path: path.to_path_buf(),
        content,
    })
}

fn looks_like_path(arg: &str) -> bool {
    let has_operators = arg.contains(['>', '|']) || arg.chars().any(char::is_whitespace);
    if has_operators {
        return false;
    }
    let has_separator = arg.contains(['/', '\\']);
    let is_hint = arg.starts_with("d(") || arg.starts_with("f(");
    has_separator || (arg.contains('.') && !is_hint)
}

fn read(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
