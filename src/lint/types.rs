//! Core types for the lint module.
//!
//! This module contains the fundamental types shared by the normalization layer:
//! - `LintCategory` - The four linted source categories
//! - `FieldPath` / `FieldMap` - Accessors into an engine's raw issue shape
//! - `CanonicalIssue` - One normalized finding
//! - `RunSummary` - What a single category run produced

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LintError, Result};

// ============================================================================
// Categories
// ============================================================================

/// Source categories, one lint runner each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintCategory {
    Script,
    Stylesheet,
    TypedScript,
    Markup,
}

impl LintCategory {
    pub const ALL: [LintCategory; 4] = [
        LintCategory::Script,
        LintCategory::Stylesheet,
        LintCategory::TypedScript,
        LintCategory::Markup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LintCategory::Script => "script",
            LintCategory::Stylesheet => "stylesheet",
            LintCategory::TypedScript => "typed-script",
            LintCategory::Markup => "markup",
        }
    }

    /// File name of this category's report inside the output directory
    pub fn report_file_name(&self) -> &'static str {
        match self {
            LintCategory::Script => "es-lint-result.xml",
            LintCategory::Stylesheet => "scss-lint-result.xml",
            LintCategory::TypedScript => "ts-lint-result.xml",
            LintCategory::Markup => "html-lint-result.xml",
        }
    }
}

impl std::fmt::Display for LintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field access
// ============================================================================

/// Dotted accessor into a raw JSON issue (e.g. `startPosition.line`).
///
/// Numeric segments index into arrays. A path that runs off the value yields
/// `None` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(path: &str) -> Self {
        Self {
            raw: path.to_string(),
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolve the path against a raw issue
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments.iter().try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldPath::new(&raw))
    }
}

/// How to read message/line/column out of one engine's raw issue shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMap {
    pub message: FieldPath,
    pub line: FieldPath,
    pub column: FieldPath,
    /// Base of the engine's line numbers (0 or 1); canonical lines are 1-based
    #[serde(default = "default_line_base")]
    pub line_base: u8,
}

fn default_line_base() -> u8 {
    1
}

impl FieldMap {
    pub fn new(message: &str, line: &str, column: &str) -> Self {
        Self {
            message: FieldPath::new(message),
            line: FieldPath::new(line),
            column: FieldPath::new(column),
            line_base: 1,
        }
    }

    /// Mark the engine as reporting 0-based line numbers
    pub fn zero_based_lines(mut self) -> Self {
        self.line_base = 0;
        self
    }
}

/// Decides whether a raw finding carries the engine's own error severity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailRule {
    pub severity: FieldPath,
    pub error_value: Value,
}

impl FailRule {
    pub fn new(severity: &str, error_value: Value) -> Self {
        Self {
            severity: FieldPath::new(severity),
            error_value,
        }
    }

    pub fn is_error(&self, raw: &Value) -> bool {
        self.severity.get(raw) == Some(&self.error_value)
    }
}

// ============================================================================
// Issue Types
// ============================================================================

/// Severity written to reports; every finding is reported as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

/// A single normalized finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalIssue {
    /// Human-readable message (absent when the accessor found nothing)
    pub message: Option<String>,

    /// Line number (1-based)
    pub line: Option<u64>,

    /// Column as reported by the engine (offset or 1-based column)
    pub column: Option<u64>,

    pub severity: Severity,
}

// ============================================================================
// Result Types
// ============================================================================

/// Results from running a single category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub category: LintCategory,

    /// Files handed to the engine
    pub files_scanned: usize,

    /// Files that got a report entry
    pub files_with_issues: usize,

    /// Total findings recorded
    pub issue_count: usize,

    /// Findings carrying the engine's own error severity
    pub error_findings: usize,

    /// Whether this category aborts the task on error findings
    pub fail_on_error: bool,

    /// Written report (None for console-only runs)
    pub report_path: Option<PathBuf>,
}

impl RunSummary {
    /// Whether this run should fail the enclosing task
    pub fn fails_task(&self) -> bool {
        self.fail_on_error && self.error_findings > 0
    }

    /// Turn a failing run into a `Findings` error
    pub fn check(&self) -> Result<()> {
        if self.fails_task() {
            return Err(LintError::Findings {
                category: self.category.to_string(),
                count: self.error_findings,
            });
        }
        Ok(())
    }
}
