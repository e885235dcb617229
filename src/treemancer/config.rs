//! Configuration loader
//!
//! Settings are read in four layers, later ones winning: the bundled
//! `defaults/treemancer.default.toml`, `./treemancer.toml` when present, the
//! file named by `--config`, and finally individual command-line flags.
//! [`Loader`] stacks the layers and produces a [`TreemancerConfig`].

use crate::treemancer::creator::CreateOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/treemancer.default.toml");

/// Name of the optional per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "treemancer.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct TreemancerConfig {
    pub create: CreateConfig,
    pub diagram: DiagramConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateConfig {
    pub output: PathBuf,
    pub create_files: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    pub all_trees: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, e.g. `warn` or `treemancer=debug`
    pub filter: String,
}

impl TreemancerConfig {
    pub fn create_options(&self) -> CreateOptions {
        CreateOptions {
            create_files: self.create.create_files,
            dry_run: self.create.dry_run,
        }
    }
}

/// Stack of settings sources, lowest precedence first
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the bundled defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist by the time [`Loader::build`] runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that may be missing, as `./treemancer.toml` usually is.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key, e.g. `create.dry_run`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers; a missing required file or a mistyped value fails here.
    pub fn build(self) -> Result<TreemancerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings when no file or flag says otherwise
pub fn load_defaults() -> Result<TreemancerConfig, ConfigError> {
    Loader::new().build()
}
