//! Shared configuration loader for the critic toolchain.
//!
//! `defaults/critic.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CriticConfig`].
//!
//! The `critic` binary layers, later entries winning:
//!
//! 1. the embedded defaults
//! 2. the file given with `--config`
//! 3. `CRITIC_<TABLE>__<KEY>` environment variables, e.g. `CRITIC_RENDER__VIEW=edited`
//! 4. command-line flags, applied as overrides

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use critic_babel::MarkdownOptions;
use critic_parser::{Mode, RenderPolicy, View};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use config::ValueKind;

const DEFAULT_TOML: &str = include_str!("../defaults/critic.default.toml");
const ENV_PREFIX: &str = "CRITIC";

/// Top-level configuration consumed by critic applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CriticConfig {
    pub render: RenderConfig,
    pub convert: ConvertConfig,
    pub markdown: MarkdownConfig,
    pub template: TemplateConfig,
}

/// How documents are rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub view: View,
    pub mode: Mode,
    pub markers: MarkerStyle,
}

impl RenderConfig {
    pub fn policy(&self) -> RenderPolicy {
        RenderPolicy::new(self.view, self.mode)
    }
}

/// Which concrete markers tagged output uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    Html,
    Brackets,
}

/// Passes applied after rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: bool,
    pub template: bool,
}

/// Mirrors the extensions exposed by the markdown pass.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarkdownConfig {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            table: config.table,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub title: String,
    pub path: Option<PathBuf>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `CRITIC_<TABLE>__<KEY>` variables from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_vars(None)
    }

    /// Same as [`Loader::with_env`], reading from `vars` instead of the process when given.
    fn with_env_vars(mut self, vars: Option<HashMap<String, String>>) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(vars);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CriticConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CriticConfig, ConfigError> {
    Loader::new().build()
}
