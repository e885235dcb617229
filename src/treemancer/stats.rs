//! File statistics for a tree

use crate::treemancer::ast::Node;
use crate::treemancer::formats::registry::{FormatError, Formatter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Number of files sharing one extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStat {
    /// Lowercase with the leading dot (`.rs`); `None` for files without one
    pub extension: Option<String>,
    pub files: usize,
}

/// Group the tree's files by extension, most common first.
///
/// Ties are broken by extension, with extension-less files after the rest.
pub fn file_statistics(tree: &Node) -> Vec<ExtensionStat> {
    let mut counts: BTreeMap<Option<String>, usize> = BTreeMap::new();
    for (_, node) in tree.walk() {
        if node.is_file() {
            *counts.entry(node.extension()).or_default() += 1;
        }
    }

    let mut stats: Vec<ExtensionStat> = counts
        .into_iter()
        .map(|(extension, files)| ExtensionStat { extension, files })
        .collect();
    stats.sort_by(|a, b| {
        b.files
            .cmp(&a.files)
            .then_with(|| a.extension.is_none().cmp(&b.extension.is_none()))
            .then_with(|| a.extension.cmp(&b.extension))
    });
    stats
}

/// Plain-text summary: totals, then one line per extension
pub fn summary(tree: &Node) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "directories: {}", tree.count_directories());
    let _ = writeln!(output, "files: {}", tree.count_files());
    for stat in file_statistics(tree) {
        let label = stat.extension.as_deref().unwrap_or("(none)");
        let _ = writeln!(output, "  {label}: {}", stat.files);
    }
    output
}

pub struct StatsFormatter;

impl Formatter for StatsFormatter {
    fn name(&self) -> &str {
        "stats"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(summary(tree))
    }

    fn description(&self) -> &str {
        "Directory and file counts, files by extension"
    }
}
