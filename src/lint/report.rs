//! Per-run report document and its checkstyle rendering.
//!
//! A `ReportDocument` collects canonical issues grouped by file. Entries are
//! created on the first issue for a file, so clean files never show up.
//! Rendering finalizes the document; no issue can be appended afterwards.

use std::collections::HashMap;

use crate::error::{LintError, Result};
use crate::lint::types::{CanonicalIssue, LintCategory};

/// All issues found in one file
#[derive(Debug, Clone)]
pub struct FileReportEntry {
    pub name: String,
    pub issues: Vec<CanonicalIssue>,
}

/// Issues of one category run, in order of first appearance per file
#[derive(Debug)]
pub struct ReportDocument {
    category: LintCategory,
    files: Vec<FileReportEntry>,
    by_name: HashMap<String, usize>,
    finalized: bool,
}

impl ReportDocument {
    pub fn new(category: LintCategory) -> Self {
        Self {
            category,
            files: Vec::new(),
            by_name: HashMap::new(),
            finalized: false,
        }
    }

    pub fn category(&self) -> LintCategory {
        self.category
    }

    pub fn files(&self) -> &[FileReportEntry] {
        &self.files
    }

    pub fn issue_count(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Record an issue, creating the file entry on first touch
    pub fn append(&mut self, file: &str, issue: CanonicalIssue) -> Result<()> {
        if self.finalized {
            return Err(self.finalized_error());
        }
        let idx = match self.by_name.get(file) {
            Some(&idx) => idx,
            None => {
                self.files.push(FileReportEntry {
                    name: file.to_string(),
                    issues: Vec::new(),
                });
                self.by_name.insert(file.to_string(), self.files.len() - 1);
                self.files.len() - 1
            }
        };
        self.files[idx].issues.push(issue);
        Ok(())
    }

    /// Render the checkstyle document and seal it against further writes
    pub fn finalize(&mut self) -> Result<String> {
        if self.finalized {
            return Err(self.finalized_error());
        }
        self.finalized = true;
        Ok(render_checkstyle(&self.files))
    }

    fn finalized_error(&self) -> LintError {
        LintError::ReportFinalized {
            category: self.category.to_string(),
        }
    }
}

/// Render file entries as a pretty-printed checkstyle document
pub fn render_checkstyle(files: &[FileReportEntry]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\"?>\n");
    if files.is_empty() {
        out.push_str("<checkstyle/>\n");
        return out;
    }

    out.push_str("<checkstyle>\n");
    for file in files {
        out.push_str(&format!("  <file name=\"{}\">\n", xml_escape(&file.name)));
        for issue in &file.issues {
            out.push_str("    <error");
            if let Some(message) = &issue.message {
                out.push_str(&format!(" message=\"{}\"", xml_escape(message)));
            }
            if let Some(line) = issue.line {
                out.push_str(&format!(" line=\"{}\"", line));
            }
            out.push_str(&format!(" severity=\"{}\"/>\n", issue.severity.as_str()));
        }
        out.push_str("  </file>\n");
    }
    out.push_str("</checkstyle>\n");
    out
}

fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
