//! Command modules for the lint-report CLI
//!
//! All command handlers take a shared `CommandContext` carrying the resolved
//! project root, loaded settings and output format.

pub mod lint;

pub use lint::run_lint;

use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::lint::{CommandEngine, EngineSet, LintCategory, LintEngine};

/// Shared context passed to all command handlers
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root every path is resolved against
    pub root: PathBuf,
    /// Loaded project settings
    pub settings: Settings,
    /// Summary format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
}

/// The configured command engine for every category
#[derive(Debug, Clone)]
pub struct DefaultEngines {
    script: CommandEngine,
    stylesheet: CommandEngine,
    typed_script: CommandEngine,
    markup: CommandEngine,
}

impl DefaultEngines {
    pub fn from_settings(settings: &Settings, root: &Path) -> Self {
        let engine = |category| CommandEngine::new(settings.profile(root, category).engine);
        Self {
            script: engine(LintCategory::Script),
            stylesheet: engine(LintCategory::Stylesheet),
            typed_script: engine(LintCategory::TypedScript),
            markup: engine(LintCategory::Markup),
        }
    }
}

impl EngineSet for DefaultEngines {
    fn engine(&self, category: LintCategory) -> &dyn LintEngine {
        match category {
            LintCategory::Script => &self.script,
            LintCategory::Stylesheet => &self.stylesheet,
            LintCategory::TypedScript => &self.typed_script,
            LintCategory::Markup => &self.markup,
        }
    }
}
