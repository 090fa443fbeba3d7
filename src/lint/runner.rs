//! Category runners: resolve config, open the report, scan, finalize.
//!
//! Every runner owns its document and report stream, so the aggregate task
//! can run all four in parallel without coordination.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::config::{CategoryProfile, Settings};
use crate::error::{LintError, Result};
use crate::lint::console::Console;
use crate::lint::engine::{IssueConsumer, LintEngine, ScanRequest};
use crate::lint::files::select_files;
use crate::lint::normalize::report_issues;
use crate::lint::report::ReportDocument;
use crate::lint::resolver::ConfigResolver;
use crate::lint::types::{FailRule, FieldMap, LintCategory, RunSummary};
use crate::lint::writer::ReportWriter;

/// Lifecycle of a reporting run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    ConfigResolved,
    StreamOpen,
    Scanning,
    Finalized,
}

/// Consumer that normalizes issues into a report and writes it once the
/// engine has signalled both input end and scan completion.
pub struct ReportingConsumer<'a> {
    fields: &'a FieldMap,
    fail_rule: Option<&'a FailRule>,
    console: &'a dyn Console,
    document: ReportDocument,
    writer: Option<ReportWriter>,
    state: RunState,
    input_ended: bool,
    scan_completed: bool,
    error_findings: usize,
    report_path: Option<PathBuf>,
}

impl<'a> ReportingConsumer<'a> {
    pub fn new(
        category: LintCategory,
        fields: &'a FieldMap,
        fail_rule: Option<&'a FailRule>,
        writer: ReportWriter,
        console: &'a dyn Console,
    ) -> Self {
        Self {
            fields,
            fail_rule,
            console,
            document: ReportDocument::new(category),
            writer: Some(writer),
            state: RunState::StreamOpen,
            input_ended: false,
            scan_completed: false,
            error_findings: 0,
            report_path: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn document(&self) -> &ReportDocument {
        &self.document
    }

    pub fn error_findings(&self) -> usize {
        self.error_findings
    }

    /// Where the report was written, once finalized
    pub fn report_path(&self) -> Option<&Path> {
        self.report_path.as_deref()
    }

    fn try_finalize(&mut self) -> Result<()> {
        if self.input_ended && self.scan_completed && self.state != RunState::Finalized {
            self.finalize()?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let writer = self.writer.take().ok_or_else(|| LintError::ReportFinalized {
            category: self.document.category().to_string(),
        })?;
        let path = writer.finalize(&mut self.document)?;
        self.state = RunState::Finalized;
        self.report_path = Some(path);
        Ok(())
    }

    /// Finalize after the engine returned, even if a signal never fired
    pub fn finish(&mut self) -> Result<()> {
        if self.state == RunState::Finalized {
            return Ok(());
        }
        if !self.input_ended {
            tracing::debug!("{}: engine never signalled input end", self.document.category());
        }
        if !self.scan_completed {
            tracing::debug!("{}: engine never signalled scan completion", self.document.category());
        }
        self.finalize()
    }
}

impl IssueConsumer for ReportingConsumer<'_> {
    fn on_issues(&mut self, file: &str, issues: &[Value]) -> Result<()> {
        if issues.is_empty() {
            return Ok(());
        }
        if self.state == RunState::Finalized {
            return Err(LintError::ReportFinalized {
                category: self.document.category().to_string(),
            });
        }
        self.state = RunState::Scanning;
        if let Some(rule) = self.fail_rule {
            self.error_findings += issues.iter().filter(|raw| rule.is_error(raw)).count();
        }
        report_issues(file, issues, self.fields, Some(&mut self.document), self.console)?;
        Ok(())
    }

    fn on_input_end(&mut self) -> Result<()> {
        self.input_ended = true;
        self.try_finalize()
    }

    fn on_scan_complete(&mut self) -> Result<()> {
        self.scan_completed = true;
        self.try_finalize()
    }
}

/// Consumer that only echoes issues to the console
pub struct ConsoleConsumer<'a> {
    fields: &'a FieldMap,
    console: &'a dyn Console,
    issue_count: usize,
}

impl<'a> ConsoleConsumer<'a> {
    pub fn new(fields: &'a FieldMap, console: &'a dyn Console) -> Self {
        Self {
            fields,
            console,
            issue_count: 0,
        }
    }

    pub fn issue_count(&self) -> usize {
        self.issue_count
    }
}

impl IssueConsumer for ConsoleConsumer<'_> {
    fn on_issues(&mut self, file: &str, issues: &[Value]) -> Result<()> {
        self.issue_count += report_issues(file, issues, self.fields, None, self.console)?;
        Ok(())
    }

    fn on_input_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_scan_complete(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Runner for one lint category
pub struct LintRunner<'a> {
    profile: CategoryProfile,
    settings: &'a Settings,
    root: &'a Path,
    engine: &'a dyn LintEngine,
    console: &'a dyn Console,
}

impl<'a> LintRunner<'a> {
    pub fn new(
        category: LintCategory,
        settings: &'a Settings,
        root: &'a Path,
        engine: &'a dyn LintEngine,
        console: &'a dyn Console,
    ) -> Self {
        Self {
            profile: settings.profile(root, category),
            settings,
            root,
            engine,
            console,
        }
    }

    /// Run the full scan and write the category report
    pub fn run(&self) -> Result<RunSummary> {
        let category = self.profile.category;
        tracing::debug!("{}: {:?}", category, RunState::Init);

        let resolver = ConfigResolver::new(self.root, &self.settings.linters, self.console);
        let config = resolver.resolve(category, self.profile.engine.config_mode)?;
        tracing::debug!("{}: {:?}", category, RunState::ConfigResolved);

        // A bad glob must fail before the previous report is replaced
        let files = select_files(self.root, &self.profile.include, &self.profile.exclude)?;
        let files_scanned = files.len();

        let writer = ReportWriter::open(&self.profile.report_path)?;
        let mut consumer = ReportingConsumer::new(
            category,
            &self.profile.fields,
            self.profile.fail_rule.as_ref(),
            writer,
            self.console,
        );
        tracing::debug!("{}: {:?}", category, RunState::StreamOpen);

        if files.is_empty() {
            tracing::debug!("{}: no matching files, skipping {}", category, self.engine.name());
            consumer.on_input_end()?;
            consumer.on_scan_complete()?;
        } else {
            let request = ScanRequest {
                root: self.root.to_path_buf(),
                files,
                config,
            };
            self.engine.scan(&request, &mut consumer)?;
        }
        consumer.finish()?;

        let summary = RunSummary {
            category,
            files_scanned,
            files_with_issues: consumer.document().files().len(),
            issue_count: consumer.document().issue_count(),
            error_findings: consumer.error_findings(),
            fail_on_error: self.profile.fail_on_error,
            report_path: consumer.report_path().map(Path::to_path_buf),
        };
        tracing::info!(
            "{}: {} file(s) scanned, {} issue(s) in {} file(s)",
            category,
            summary.files_scanned,
            summary.issue_count,
            summary.files_with_issues
        );
        Ok(summary)
    }
}

/// Engines for each category
pub trait EngineSet: Sync {
    fn engine(&self, category: LintCategory) -> &dyn LintEngine;
}

/// Run every category concurrently.
///
/// All runners finish before errors are inspected. An infrastructure error
/// wins over findings; otherwise the first failing fail-fast category is
/// reported.
pub fn run_all(
    settings: &Settings,
    root: &Path,
    engines: &dyn EngineSet,
    console: &dyn Console,
) -> (Vec<RunSummary>, Result<()>) {
    let categories = LintCategory::ALL.to_vec();
    let results: Vec<Result<RunSummary>> = categories
        .par_iter()
        .map(|&category| {
            LintRunner::new(category, settings, root, engines.engine(category), console).run()
        })
        .collect();

    let mut summaries = Vec::new();
    let mut failure: Option<LintError> = None;
    for result in results {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                tracing::error!("Lint run failed: {}", e);
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }

    if let Some(e) = failure {
        return (summaries, Err(e));
    }
    let outcome = summaries.iter().try_for_each(RunSummary::check);
    (summaries, outcome)
}

/// Scan only the markup entry point, echoing issues without a report.
///
/// Returns the number of issues printed; findings never fail this check.
pub fn preflight_markup(
    settings: &Settings,
    root: &Path,
    engine: &dyn LintEngine,
    console: &dyn Console,
) -> Result<usize> {
    let profile = settings.profile(root, LintCategory::Markup);
    let resolver = ConfigResolver::new(root, &settings.linters, console);
    let config = resolver.resolve(LintCategory::Markup, profile.engine.config_mode)?;

    let index = root.join(&settings.index);
    if !index.is_file() {
        tracing::warn!("Markup entry point {} does not exist", index.display());
        return Ok(0);
    }

    let request = ScanRequest {
        root: root.to_path_buf(),
        files: vec![index],
        config,
    };
    let mut consumer = ConsoleConsumer::new(&profile.fields, console);
    engine.scan(&request, &mut consumer)?;
    Ok(consumer.issue_count())
}
