//! Indentation settings.
//!
//! `defaults/quorum.default.toml` is embedded into the crate so that docs and runtime behavior
//! stay in sync. Hosts layer their own files and overrides on top of those defaults via
//! [`Loader`] before deserializing into [`QuorumConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/quorum.default.toml");

pub const DEFAULT_INDENT_UNIT: usize = 4;
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Settings the lexer and indent query depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Columns per nesting level.
    pub indent_unit: usize,
    /// Columns a tab advances to when measuring a line's indentation.
    pub tab_size: usize,
}

impl QuorumConfig {
    pub fn with_indent_unit(indent_unit: usize) -> Self {
        Self {
            indent_unit,
            ..Self::default()
        }
    }

    /// Reject settings the indent arithmetic cannot work with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.indent_unit == 0 {
            return Err(ConfigError::InvalidIndentUnit(self.indent_unit));
        }
        if self.tab_size == 0 {
            return Err(ConfigError::InvalidTabSize(self.tab_size));
        }
        Ok(self)
    }
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

/// Errors that can occur while loading settings
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    InvalidIndentUnit(usize),
    InvalidTabSize(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {}", e),
            ConfigError::InvalidIndentUnit(unit) => {
                write!(f, "Invalid indent_unit {}: must be at least 1", unit)
            }
            ConfigError::InvalidTabSize(size) => {
                write!(f, "Invalid tab_size {}: must be at least 1", size)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err)
    }
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate.
    pub fn build(self) -> Result<QuorumConfig, ConfigError> {
        let config: QuorumConfig = self.builder.build()?.try_deserialize()?;
        log::debug!(
            "loaded config: indent_unit={} tab_size={}",
            config.indent_unit,
            config.tab_size
        );
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuorumConfig, ConfigError> {
    Loader::new().build()
}
