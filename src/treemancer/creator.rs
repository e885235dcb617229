//! Materialize trees on disk
//!
//! The creator walks a finished tree depth-first and creates one directory or
//! empty file per node under a base directory. A failure is recorded against
//! its node and the walk goes on, so one bad entry never hides the rest of the
//! report.

use crate::treemancer::ast::{Node, NodeKind};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    /// When false only directories are created and files are skipped entirely
    pub create_files: bool,
    /// Record what would be created without touching the disk
    pub dry_run: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            create_files: true,
            dry_run: false,
        }
    }
}

/// What happened to one node
#[derive(Debug)]
pub struct NodeOutcome {
    pub path: PathBuf,
    pub kind: NodeKind,
    pub result: Result<(), io::Error>,
}

impl NodeOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-node outcomes of one tree, in walk order
#[derive(Debug, Default)]
pub struct CreationReport {
    pub outcomes: Vec<NodeOutcome>,
    pub dry_run: bool,
}

impl CreationReport {
    pub fn directories_created(&self) -> usize {
        self.count_ok(NodeKind::Directory)
    }

    pub fn files_created(&self) -> usize {
        self.count_ok(NodeKind::File)
    }

    fn count_ok(&self, kind: NodeKind) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.kind == kind && outcome.is_ok())
            .count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }

    pub fn is_success(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Paths created (or that would be created), in walk order
    pub fn structure(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_ok())
            .map(|outcome| outcome.path.as_path())
            .collect()
    }
}

impl fmt::Display for CreationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = if self.dry_run {
            "Dry run summary"
        } else {
            "Creation summary"
        };
        writeln!(f, "{heading}:")?;
        writeln!(f, "  Directories created: {}", self.directories_created())?;
        writeln!(f, "  Files created: {}", self.files_created())?;
        let errors: Vec<&NodeOutcome> = self.errors().collect();
        if !errors.is_empty() {
            writeln!(f, "  Errors ({}):", errors.len())?;
            for outcome in errors {
                if let Err(err) = &outcome.result {
                    writeln!(f, "    - Error creating {}: {}", outcome.path.display(), err)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeCreator {
    options: CreateOptions,
}

impl TreeCreator {
    pub fn new(options: CreateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CreateOptions {
        self.options
    }

    /// Create `tree` under `base`; the root becomes `base/<root name>`.
    pub fn create(&self, tree: &Node, base: &Path) -> CreationReport {
        let mut report = CreationReport {
            outcomes: Vec::new(),
            dry_run: self.options.dry_run,
        };
        self.create_node(tree, base, &mut report);
        debug!(
            directories = report.directories_created(),
            files = report.files_created(),
            errors = report.errors().count(),
            "tree creation finished"
        );
        report
    }

    /// Create each tree under its own `tree_NN` directory, numbered from 1.
    pub fn create_many(&self, trees: &[Node], base: &Path) -> Vec<CreationReport> {
        trees
            .iter()
            .enumerate()
            .map(|(i, tree)| {
                let numbered = base.join(format!("tree_{:02}", i + 1));
                info!(tree = i + 1, total = trees.len(), base = %numbered.display(), "creating tree");
                self.create(tree, &numbered)
            })
            .collect()
    }

    fn create_node(&self, node: &Node, base: &Path, report: &mut CreationReport) {
        let path = base.join(node.name());

        if node.is_file() && !self.options.create_files {
            debug!(path = %path.display(), "skipping file");
            return;
        }

        if let Err(err) = single_component(node.name()) {
            warn!(kind = %node.kind(), base = %base.display(), error = %err, "refusing entry and its subtree");
            report.outcomes.push(NodeOutcome {
                path: base.to_path_buf(),
                kind: node.kind(),
                result: Err(err),
            });
            return;
        }

        let result = if self.options.dry_run {
            Ok(())
        } else if node.is_dir() {
            fs::create_dir_all(&path)
        } else {
            create_empty_file(&path)
        };

        match &result {
            Ok(()) if self.options.dry_run => {
                info!(kind = %node.kind(), path = %path.display(), "[dry run] would create")
            }
            Ok(()) => info!(kind = %node.kind(), path = %path.display(), "created"),
            Err(err) => warn!(kind = %node.kind(), path = %path.display(), error = %err, "creation failed"),
        }

        report.outcomes.push(NodeOutcome {
            path: path.clone(),
            kind: node.kind(),
            result,
        });

        for child in node.children() {
            self.create_node(child, &path, report);
        }
    }
}

/// Entry names must stay inside their parent: no separators, no `.`/`..`, no roots.
fn single_component(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name && !name.contains('\\') => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{name}` is not a single file or directory name"),
        )),
    }
}

fn create_empty_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
}
