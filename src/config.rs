//! Project lint configuration.
//!
//! Loaded from an optional `lint.toml` at the project root. Every field has
//! a default, so an empty or missing file gives the stock layout:
//!
//! ```toml
//! output_dir = "target"
//! index = "app/index.html"
//!
//! [linters]
//! stylesheet = "config/scss.json"
//! typed_script = "config/tslint.json"
//! markup = "config/htmllint.json"
//!
//! [typed_script]
//! include = ["app/**/*.ts", "!app/**/*.spec.ts"]
//!
//! [markup.engine]
//! program = "htmlhint"
//! args = ["--format", "json"]
//!
//! # scss-lint instead of stylelint
//! [stylesheet.engine]
//! program = "scss-lint"
//! args = ["--format", "JSON"]
//! shape = { kind = "file_map" }
//!
//! [stylesheet.fields]
//! message = "reason"
//!
//! [stylesheet.fail_rule]
//! severity = "severity"
//! error_value = "error"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{LintError, Result};
use crate::lint::engine::{ConfigMode, EngineSpec, OutputShape};
use crate::lint::{FailRule, FieldMap, FieldPath, LintCategory};

/// Default config file name, relative to the project root
pub const CONFIG_FILE_NAME: &str = "lint.toml";

/// Project lint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory that receives the report files
    pub output_dir: PathBuf,

    /// Markup entry point for the pre-flight check
    pub index: PathBuf,

    /// Per-linter config files
    pub linters: LinterPaths,

    pub script: CategorySettings,
    pub stylesheet: CategorySettings,
    pub typed_script: CategorySettings,
    pub markup: CategorySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("target"),
            index: PathBuf::from("app/index.html"),
            linters: LinterPaths::default(),
            script: CategorySettings::default(),
            stylesheet: CategorySettings::default(),
            typed_script: CategorySettings::default(),
            markup: CategorySettings::default(),
        }
    }
}

/// Project-relative config file path per category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinterPaths {
    pub script: Option<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub typed_script: Option<PathBuf>,
    pub markup: Option<PathBuf>,
}

impl Default for LinterPaths {
    fn default() -> Self {
        Self {
            script: None,
            stylesheet: Some(PathBuf::from("config/scss.json")),
            typed_script: Some(PathBuf::from("config/tslint.json")),
            markup: Some(PathBuf::from("config/htmllint.json")),
        }
    }
}

impl LinterPaths {
    pub fn get(&self, category: LintCategory) -> Option<&Path> {
        match category {
            LintCategory::Script => self.script.as_deref(),
            LintCategory::Stylesheet => self.stylesheet.as_deref(),
            LintCategory::TypedScript => self.typed_script.as_deref(),
            LintCategory::Markup => self.markup.as_deref(),
        }
    }
}

/// Optional per-category overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategorySettings {
    /// Globs selecting files; entries starting with `!` exclude
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub fail_on_error: Option<bool>,
    pub engine: Option<EngineOverride>,
    /// Where message/line/column live in the engine's raw issues
    pub fields: Option<FieldOverride>,
    /// Raw field and value that mark an engine-level error
    pub fail_rule: Option<FailRule>,
}

/// Overrides for the engine invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOverride {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub config_flag: Option<String>,
    pub config_mode: Option<ConfigMode>,
    pub shape: Option<OutputShape>,
}

/// Overrides for the raw issue field map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOverride {
    pub message: Option<FieldPath>,
    pub line: Option<FieldPath>,
    pub column: Option<FieldPath>,
    pub line_base: Option<u8>,
}

impl FieldOverride {
    fn apply(&self, mut fields: FieldMap) -> FieldMap {
        if let Some(message) = &self.message {
            fields.message = message.clone();
        }
        if let Some(line) = &self.line {
            fields.line = line.clone();
        }
        if let Some(column) = &self.column {
            fields.column = column.clone();
        }
        if let Some(base) = self.line_base {
            fields.line_base = base;
        }
        fields
    }
}

/// Fully resolved wiring for one category runner
#[derive(Debug, Clone)]
pub struct CategoryProfile {
    pub category: LintCategory,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub fields: FieldMap,
    pub fail_rule: Option<FailRule>,
    pub fail_on_error: bool,
    pub engine: EngineSpec,
    pub report_path: PathBuf,
}

impl Settings {
    /// Load settings for a project.
    ///
    /// With no explicit path, a missing `<root>/lint.toml` yields defaults.
    /// An explicitly named file must exist.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => root.join(p),
            None => root.join(CONFIG_FILE_NAME),
        };

        if !path.is_file() {
            if explicit.is_some() {
                return Err(LintError::Config {
                    path,
                    message: "file not found".to_string(),
                });
            }
            tracing::debug!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| LintError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn category(&self, category: LintCategory) -> &CategorySettings {
        match category {
            LintCategory::Script => &self.script,
            LintCategory::Stylesheet => &self.stylesheet,
            LintCategory::TypedScript => &self.typed_script,
            LintCategory::Markup => &self.markup,
        }
    }

    /// Absolute report path for a category
    pub fn report_path(&self, root: &Path, category: LintCategory) -> PathBuf {
        root.join(&self.output_dir).join(category.report_file_name())
    }

    /// Merge the category's defaults with any overrides
    pub fn profile(&self, root: &Path, category: LintCategory) -> CategoryProfile {
        let overrides = self.category(category);
        let defaults = CategoryDefaults::for_category(category);

        let mut engine = EngineSpec::default_for(category);
        if let Some(o) = &overrides.engine {
            if let Some(program) = &o.program {
                engine.program = program.clone();
            }
            if let Some(args) = &o.args {
                engine.args = args.clone();
            }
            if let Some(flag) = &o.config_flag {
                engine.config_flag = flag.clone();
            }
            if let Some(mode) = o.config_mode {
                engine.config_mode = mode;
            }
            if let Some(shape) = &o.shape {
                engine.shape = shape.clone();
            }
        }

        let fields = match &overrides.fields {
            Some(o) => o.apply(defaults.fields),
            None => defaults.fields,
        };

        CategoryProfile {
            category,
            include: overrides.include.clone().unwrap_or(defaults.include),
            exclude: overrides.exclude.clone().unwrap_or(defaults.exclude),
            fields,
            fail_rule: overrides.fail_rule.clone().or(defaults.fail_rule),
            fail_on_error: overrides.fail_on_error.unwrap_or(defaults.fail_on_error),
            engine,
            report_path: self.report_path(root, category),
        }
    }
}

/// Built-in wiring per category
struct CategoryDefaults {
    include: Vec<String>,
    exclude: Vec<String>,
    fields: FieldMap,
    fail_rule: Option<FailRule>,
    fail_on_error: bool,
}

impl CategoryDefaults {
    fn for_category(category: LintCategory) -> Self {
        let globs = |g: &[&str]| g.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        match category {
            LintCategory::Script => Self {
                include: globs(&["app/**/*.js", "gulpfile.js", "tasks/*.js"]),
                exclude: globs(&["app/patch/**", "app/lib/**", "app/resources/**"]),
                fields: FieldMap::new("message", "line", "column"),
                fail_rule: Some(FailRule::new("severity", json!(2))),
                fail_on_error: true,
            },
            LintCategory::Stylesheet => Self {
                include: globs(&["app/**/*.scss"]),
                exclude: Vec::new(),
                fields: FieldMap::new("text", "line", "column"),
                fail_rule: Some(FailRule::new("severity", json!("error"))),
                fail_on_error: false,
            },
            LintCategory::TypedScript => Self {
                include: globs(&["app/**/*.ts"]),
                exclude: Vec::new(),
                fields: FieldMap::new("failure", "startPosition.line", "startPosition.position")
                    .zero_based_lines(),
                fail_rule: Some(FailRule::new("ruleSeverity", json!("error"))),
                fail_on_error: false,
            },
            LintCategory::Markup => Self {
                include: globs(&["app/**/*.html"]),
                exclude: Vec::new(),
                fields: FieldMap::new("message", "line", "col"),
                fail_rule: Some(FailRule::new("type", json!("error"))),
                fail_on_error: false,
            },
        }
    }
}
