//! lint-report: runs project linters and normalizes their findings
//!
//! This library drives four external lint engines (script, stylesheet,
//! typed-script and markup) over a project tree and turns their
//! heterogeneous JSON output into one checkstyle report per category,
//! echoing a console line for every finding as it is detected.
//!
//! # Example
//!
//! ```ignore
//! use lint_report::lint::{run_all, TerminalConsole};
//! use lint_report::{DefaultEngines, Settings};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let settings = Settings::load(root, None)?;
//! let engines = DefaultEngines::from_settings(&settings, root);
//!
//! let (summaries, outcome) = run_all(&settings, root, &engines, &TerminalConsole);
//! for s in &summaries {
//!     println!("{}: {} issues", s.category, s.issue_count);
//! }
//! outcome?;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod lint;

// Re-export commonly used types
pub use cli::{Cli, Commands, OutputFormat};
pub use commands::DefaultEngines;
pub use config::Settings;
pub use error::{LintError, Result};
