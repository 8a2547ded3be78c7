//! Updater configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file,
//! then CLI flags. Any key missing from the file keeps its default.

mod exclude;

pub use exclude::{DirExcludes, ExcludeError};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Default per-directory override file name
pub const DEFAULT_OVERRIDE_FILE_NAME: &str = "0types.txt";

/// Default extension of files that receive the header
pub const DEFAULT_TARGET_EXTENSION: &str = "cha";

/// Directory names never descended into by default
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git"];

/// Errors for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Settings for a tree update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// File whose presence makes a directory an owner (e.g. "0types.txt")
    pub override_file_name: String,

    /// Extension, without the dot, of files to update (e.g. "cha")
    pub target_extension: String,

    /// Directory-name glob patterns pruned from traversal
    pub excluded_dirs: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            override_file_name: DEFAULT_OVERRIDE_FILE_NAME.to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub override_file_name: Option<String>,
    pub target_extension: Option<String>,
    pub excluded_dirs: Option<Vec<String>>,
}

impl UpdaterConfig {
    /// Load and validate config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse and validate config from a TOML string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: UpdaterConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the given file if there is one
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI values on top and re-validate
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(name) = overrides.override_file_name {
            self.override_file_name = name;
        }
        if let Some(ext) = overrides.target_extension {
            self.target_extension = ext;
        }
        if let Some(dirs) = overrides.excluded_dirs {
            self.excluded_dirs = dirs;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.override_file_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "'override_file_name' cannot be empty".to_string(),
            ));
        }

        if self.override_file_name.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(format!(
                "'override_file_name' must be a bare file name, got '{}'",
                self.override_file_name
            )));
        }

        if self.target_extension.is_empty() {
            return Err(ConfigError::ValidationError(
                "'target_extension' cannot be empty".to_string(),
            ));
        }

        if self.target_extension.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "'target_extension' is given without the dot, got '{}'",
                self.target_extension
            )));
        }

        // Surfaces bad globs at load time rather than mid-walk
        self.dir_excludes()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Suffix a file name must end with to be updated (".cha")
    pub fn target_suffix(&self) -> String {
        format!(".{}", self.target_extension)
    }

    /// Compiled exclusion rules for `excluded_dirs`
    pub fn dir_excludes(&self) -> Result<DirExcludes, ExcludeError> {
        DirExcludes::new(&self.excluded_dirs)
    }
}
