//! Human-readable feedback printed while engines report findings.
//!
//! These lines have a fixed shape that CI logs grep for, so they bypass
//! `tracing` and go straight to stderr.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use console::style;

use crate::lint::types::CanonicalIssue;

/// Sink for per-issue and missing-config console lines
pub trait Console: Send + Sync {
    /// One detected issue
    fn issue(&self, file: &str, issue: &CanonicalIssue);

    /// A per-linter config file was not found
    fn missing_config(&self, path: &Path);
}

/// Format an issue line: `<file>: <message> line <line> col. <column>`
pub fn format_issue_line(file: &str, issue: &CanonicalIssue, highlight: bool) -> String {
    let message = issue.message.as_deref().unwrap_or("?");
    let message = if highlight {
        style(message).red().for_stderr().to_string()
    } else {
        message.to_string()
    };
    format!(
        "{}: {} line {} col. {}",
        file,
        message,
        display_number(issue.line),
        display_number(issue.column)
    )
}

/// Format the missing-config warning line
pub fn format_missing_config(path: &Path, highlight: bool) -> String {
    let prefix = if highlight {
        style("Warning:").yellow().for_stderr().to_string()
    } else {
        "Warning:".to_string()
    };
    format!(
        "{} the {} file is missing, using defaults.",
        prefix,
        path.display()
    )
}

fn display_number(n: Option<u64>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Console writing to the process stderr
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    fn write_line(&self, line: &str) {
        // Lock per line so concurrent runners never interleave mid-line
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{}", line);
    }
}

impl Console for TerminalConsole {
    fn issue(&self, file: &str, issue: &CanonicalIssue) {
        self.write_line(&format_issue_line(file, issue, true));
    }

    fn missing_config(&self, path: &Path) {
        self.write_line(&format_missing_config(path, true));
    }
}

/// Console that records plain lines in memory
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<String>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Console for MemoryConsole {
    fn issue(&self, file: &str, issue: &CanonicalIssue) {
        self.push(format_issue_line(file, issue, false));
    }

    fn missing_config(&self, path: &Path) {
        self.push(format_missing_config(path, false));
    }
}
