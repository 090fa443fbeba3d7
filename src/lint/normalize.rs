//! Issue normalization: engine-specific raw issues to canonical issues.

use serde_json::Value;

use crate::error::Result;
use crate::lint::console::Console;
use crate::lint::report::ReportDocument;
use crate::lint::types::{CanonicalIssue, FieldMap, Severity};

/// Extract a canonical issue from one raw engine issue
pub fn normalize(raw: &Value, fields: &FieldMap) -> CanonicalIssue {
    let message = fields.message.get(raw).and_then(value_to_text);
    let line = fields
        .line
        .get(raw)
        .and_then(value_to_number)
        .map(|line| if fields.line_base == 0 { line.saturating_add(1) } else { line });
    let column = fields.column.get(raw).and_then(value_to_number);

    CanonicalIssue {
        message,
        line,
        column,
        severity: Severity::Error,
    }
}

/// Normalize a file's raw issues, echo each to the console and, when a
/// document is given, append them to it.
///
/// Returns the number of issues handled. An empty batch touches nothing.
pub fn report_issues(
    file: &str,
    raw_issues: &[Value],
    fields: &FieldMap,
    document: Option<&mut ReportDocument>,
    console: &dyn Console,
) -> Result<usize> {
    if raw_issues.is_empty() {
        return Ok(0);
    }

    let issues: Vec<CanonicalIssue> = raw_issues.iter().map(|raw| normalize(raw, fields)).collect();
    for issue in &issues {
        console.issue(file, issue);
    }

    let count = issues.len();
    if let Some(document) = document {
        for issue in issues {
            document.append(file, issue)?;
        }
    }
    Ok(count)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn value_to_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
