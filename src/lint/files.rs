//! File selection by include/exclude globs relative to the project root.

use std::path::{Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::error::{LintError, Result};

/// Collect files under `root` matching any include glob and no exclude glob.
///
/// Include entries prefixed with `!` are treated as excludes. Results are
/// sorted so repeated runs see the same order.
pub fn select_files(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let (negated, include): (Vec<&String>, Vec<&String>) =
        include.iter().partition(|g| g.starts_with('!'));
    if include.is_empty() {
        return Ok(Vec::new());
    }

    let overrides = build_overrides(
        root,
        include.into_iter().map(String::as_str),
        negated
            .into_iter()
            .map(|g| g.trim_start_matches('!'))
            .chain(exclude.iter().map(String::as_str)),
    )?;

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    // Skip dot-directories such as .git
    builder.hidden(true);
    builder.follow_links(false);
    builder.overrides(overrides);

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

fn build_overrides<'a>(
    root: &Path,
    include: impl Iterator<Item = &'a str>,
    exclude: impl Iterator<Item = &'a str>,
) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    for glob in include {
        builder.add(glob).map_err(|e| pattern_error(glob, e))?;
    }
    for glob in exclude {
        let negated = format!("!{}", glob);
        builder.add(&negated).map_err(|e| pattern_error(glob, e))?;
    }
    builder.build().map_err(|e| LintError::Pattern {
        pattern: "<overrides>".to_string(),
        message: e.to_string(),
    })
}

fn pattern_error(glob: &str, e: ignore::Error) -> LintError {
    LintError::Pattern {
        pattern: glob.to_string(),
        message: e.to_string(),
    }
}
