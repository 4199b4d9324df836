//! Configuration loader for koji.
//!
//! `defaults/koji.default.toml` is embedded into the library so that the documented defaults and
//! runtime behavior stay in sync. Applications layer user-specific files on top of those defaults
//! via [`Loader`] before deserializing into [`KojiConfig`].

use crate::koji::token::Messages;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/koji.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KojiConfig {
    pub mode: ModeConfig,
    pub messages: Messages,
    pub document: DocumentConfig,
}

/// The mode descriptor as written in configuration. Turned into a
/// [`Mode`](crate::koji::mode::Mode) with `Mode::from_config`, which validates it.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    pub name: String,
    /// Display class per lowercase token type name; an empty string means no class.
    #[serde(default)]
    pub classes: BTreeMap<String, String>,
}

/// Character-level presentation knobs used by the document model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentConfig {
    pub visualize_fullwidth_space: bool,
    pub fullwidth_space_glyph: String,
    pub line_break_class: String,
    pub fullwidth_space_class: String,
    pub error_class: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            visualize_fullwidth_space: true,
            fullwidth_space_glyph: "□".to_string(),
            line_break_class: "lb".to_string(),
            fullwidth_space_class: "zenkaku-space".to_string(),
            error_class: "error".to_string(),
        }
    }
}

/// Builds a [`KojiConfig`] from `defaults/koji.default.toml` plus whatever a caller stacks on top.
///
/// Later layers win key by key, so a user file only needs the class names or messages it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Class map, messages and document presentation as shipped.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file such as one passed with `--config`; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that may legitimately be absent, e.g. a per-user koji config.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        tracing::debug!(path = %path.display(), required, "layering koji config file");
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (`mode.classes.furigana = "ruby"`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<KojiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The shipped koji configuration with no user layers.
pub fn load_defaults() -> Result<KojiConfig, ConfigError> {
    Loader::new().build()
}
