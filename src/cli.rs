//! CLI argument definitions using clap with subcommand architecture
//!
//! Each subcommand is one lint task: the aggregate `lint`, one task per
//! category, and the markup entry-point pre-flight check.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Run project linters and write checkstyle reports
#[derive(Parser, Debug)]
#[command(name = "lint-report")]
#[command(about = "Runs project linters and normalizes their findings into checkstyle reports")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "LINT_REPORT_ROOT")]
    pub root: Option<PathBuf>,

    /// Settings file (defaults to <root>/lint.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available lint tasks
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run all four linters
    Lint,

    /// Lint script sources (fails on error-severity findings)
    #[command(name = "lint-js", visible_alias = "script")]
    LintJs,

    /// Lint stylesheets
    #[command(name = "lint-scss", visible_alias = "stylesheet")]
    LintScss,

    /// Lint typed-script sources
    #[command(name = "lint-ts", visible_alias = "typed-script")]
    LintTs,

    /// Lint markup
    #[command(name = "lint-html", visible_alias = "markup")]
    LintHtml,

    /// Quick console-only check of the markup entry point
    #[command(name = "lint-html-index")]
    LintHtmlIndex,
}

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON document
    Json,
}
