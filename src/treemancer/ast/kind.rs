//! Node kinds and the rules that decide them

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Whether a node becomes a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "file"),
            NodeKind::Directory => write!(f, "directory"),
        }
    }
}

/// Which signal decided a node's kind, strongest first.
///
/// Only the arena keeps this; the frozen [`Node`](super::Node) compares on
/// name, kind and children alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KindOrigin {
    /// `d(..)` / `f(..)` wrapper
    Hint,
    /// Trailing `/` on the name
    Marker,
    /// The node ended up with children
    Children,
    /// The name has an extension-like suffix
    Extension,
    /// Nothing else applied
    Default,
}

/// Longest suffix after the last dot still treated as an extension.
const MAX_EXTENSION_LEN: usize = 10;

/// True when `name` ends in an extension-like suffix (`main.py`, `archive.tar.gz`).
///
/// Dotfiles such as `.gitignore` have no extension; neither do names whose
/// suffix contains anything but ASCII letters and digits.
pub fn has_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or(false)
}

/// Decide the kind of a node that carries no explicit hint.
///
/// Must only be called once the node's children are final.
pub fn infer_kind(name: &str, has_children: bool) -> (NodeKind, KindOrigin) {
    if has_children {
        (NodeKind::Directory, KindOrigin::Children)
    } else if has_extension(name) {
        (NodeKind::File, KindOrigin::Extension)
    } else {
        (NodeKind::File, KindOrigin::Default)
    }
}
