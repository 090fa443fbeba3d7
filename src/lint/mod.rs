//! Lint runners and report normalization.
//!
//! Four categories are linted by external engines:
//!
//! - **script**: ESLint
//! - **stylesheet**: Stylelint
//! - **typed-script**: TSLint
//! - **markup**: HTMLHint
//!
//! Each engine reports findings in its own JSON shape. A per-category
//! `FieldMap` pulls message/line/column out of the raw issue, and the
//! normalized issues are collected into one checkstyle report per category
//! under the configured output directory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lint_report::lint::{LintRunner, LintCategory, CommandEngine, EngineSpec, TerminalConsole};
//! use lint_report::Settings;
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/project");
//! let settings = Settings::load(root, None)?;
//! let engine = CommandEngine::new(settings.profile(root, LintCategory::Stylesheet).engine);
//! let console = TerminalConsole;
//!
//! let summary = LintRunner::new(LintCategory::Stylesheet, &settings, root, &engine, &console).run()?;
//! println!("{} issues written to {:?}", summary.issue_count, summary.report_path);
//! ```

// Submodules
pub mod console;
pub mod engine;
mod files;
pub mod normalize;
pub mod report;
mod resolver;
mod runner;
mod types;
mod writer;

// Re-export types for public API
pub use console::{Console, MemoryConsole, TerminalConsole};
pub use engine::{
    parse_output, CommandEngine, ConfigMode, EngineSpec, IssueConsumer, LintEngine, OutputShape,
    ScanRequest,
};
pub use report::{FileReportEntry, ReportDocument};
pub use resolver::{ConfigDescriptor, ConfigResolver, ConfigValue};
pub use types::{
    CanonicalIssue, FailRule, FieldMap, FieldPath, LintCategory, RunSummary, Severity,
};
pub use writer::ReportWriter;

// Re-export core functions
pub use files::select_files;
pub use normalize::{normalize, report_issues};
pub use runner::{
    preflight_markup, run_all, ConsoleConsumer, EngineSet, LintRunner, ReportingConsumer,
    RunState,
};
