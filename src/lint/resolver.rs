//! Per-linter config file lookup.
//!
//! A missing config file is never an error: the engine falls back to its
//! built-in defaults and a warning line is printed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LinterPaths;
use crate::error::Result;
use crate::lint::console::Console;
use crate::lint::engine::ConfigMode;
use crate::lint::types::LintCategory;

/// Config option handed to an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Path(PathBuf),
    Contents(String),
}

/// Resolved configuration for one engine invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDescriptor {
    /// None means the engine runs with its defaults
    pub value: Option<ConfigValue>,
}

impl ConfigDescriptor {
    pub fn defaults() -> Self {
        Self { value: None }
    }
}

/// Resolves per-category config files against the project root
pub struct ConfigResolver<'a> {
    root: &'a Path,
    paths: &'a LinterPaths,
    console: &'a dyn Console,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(root: &'a Path, paths: &'a LinterPaths, console: &'a dyn Console) -> Self {
        Self {
            root,
            paths,
            console,
        }
    }

    /// Look up the config file configured for `category`.
    ///
    /// Categories without a configured path use engine discovery silently.
    pub fn resolve(&self, category: LintCategory, mode: ConfigMode) -> Result<ConfigDescriptor> {
        let Some(relative) = self.paths.get(category) else {
            tracing::debug!("No config file configured for {}", category);
            return Ok(ConfigDescriptor::defaults());
        };

        let path = self.root.join(relative);
        if !path.is_file() {
            self.console.missing_config(&path);
            return Ok(ConfigDescriptor::defaults());
        }

        let value = match mode {
            ConfigMode::Path => ConfigValue::Path(path),
            ConfigMode::Contents => ConfigValue::Contents(serialize_contents(&path)?),
        };
        tracing::debug!("Resolved {} config: {:?}", category, value);
        Ok(ConfigDescriptor { value: Some(value) })
    }
}

/// Read a config file for inline use; JSON is compacted onto one line
fn serialize_contents(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(json) => json.to_string(),
        Err(_) => raw.trim().to_string(),
    })
}
