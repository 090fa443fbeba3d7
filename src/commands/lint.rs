//! Lint command handler - run the lint tasks and summarize them

use crate::cli::{Commands, OutputFormat};
use crate::commands::{CommandContext, DefaultEngines};
use crate::error::Result;
use crate::lint::{
    preflight_markup, run_all, Console, EngineSet, LintCategory, LintRunner, RunSummary,
    TerminalConsole,
};

/// Run a lint task.
///
/// The summary is returned on success. When the task fails because of
/// findings, the summary is printed before the error is returned so the
/// caller still sees what was reported.
pub fn run_lint(command: Commands, ctx: &CommandContext) -> Result<String> {
    let engines = DefaultEngines::from_settings(&ctx.settings, &ctx.root);
    run_lint_with(command, ctx, &engines, &TerminalConsole)
}

/// Run a lint task with explicit engines and console
pub fn run_lint_with(
    command: Commands,
    ctx: &CommandContext,
    engines: &dyn EngineSet,
    console: &dyn Console,
) -> Result<String> {
    let category = match command {
        Commands::Lint => {
            let (summaries, outcome) = run_all(&ctx.settings, &ctx.root, engines, console);
            return finish(ctx, &summaries, outcome);
        }
        Commands::LintHtmlIndex => {
            let count = preflight_markup(
                &ctx.settings,
                &ctx.root,
                engines.engine(LintCategory::Markup),
                console,
            )?;
            return Ok(format_preflight(ctx, count));
        }
        Commands::LintJs => LintCategory::Script,
        Commands::LintScss => LintCategory::Stylesheet,
        Commands::LintTs => LintCategory::TypedScript,
        Commands::LintHtml => LintCategory::Markup,
    };

    let runner = LintRunner::new(
        category,
        &ctx.settings,
        &ctx.root,
        engines.engine(category),
        console,
    );
    let summary = runner.run()?;
    let outcome = summary.check();
    finish(ctx, std::slice::from_ref(&summary), outcome)
}

fn finish(ctx: &CommandContext, summaries: &[RunSummary], outcome: Result<()>) -> Result<String> {
    let output = format_summaries(ctx, summaries);
    match outcome {
        Ok(()) => Ok(output),
        Err(e) => {
            if e.is_findings() {
                print!("{}", output);
            }
            Err(e)
        }
    }
}

/// Render run summaries in the requested format
pub fn format_summaries(ctx: &CommandContext, summaries: &[RunSummary]) -> String {
    match ctx.format {
        OutputFormat::Json => {
            let json_value = serde_json::json!({
                "_type": "lint_run",
                "root": ctx.root.to_string_lossy(),
                "success": summaries.iter().all(|s| !s.fails_task()),
                "runs": summaries.iter().map(|s| serde_json::json!({
                    "category": s.category.as_str(),
                    "files_scanned": s.files_scanned,
                    "files_with_issues": s.files_with_issues,
                    "issues": s.issue_count,
                    "error_findings": s.error_findings,
                    "fail_on_error": s.fail_on_error,
                    "report": s.report_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                })).collect::<Vec<_>>(),
            });
            format!(
                "{}\n",
                serde_json::to_string_pretty(&json_value).unwrap_or_default()
            )
        }
        OutputFormat::Text => {
            let failed = summaries.iter().any(RunSummary::fails_task);
            let status = if failed { "fail" } else { "pass" };
            let mut output = String::new();
            output.push_str("═══════════════════════════════════════════\n");
            output.push_str(&format!("  LINT: {}\n", status.to_uppercase()));
            output.push_str("═══════════════════════════════════════════\n");
            for s in summaries {
                let icon = if s.fails_task() { "✗" } else { "✓" };
                output.push_str(&format!(
                    "  {} {:<13} files: {:<4} issues: {:<4} report: {}\n",
                    icon,
                    s.category.as_str(),
                    s.files_scanned,
                    s.issue_count,
                    s.report_path
                        .as_ref()
                        .map(|p| p.strip_prefix(&ctx.root).unwrap_or(p).display().to_string())
                        .unwrap_or_else(|| "-".to_string())
                ));
            }
            output
        }
    }
}

fn format_preflight(ctx: &CommandContext, count: usize) -> String {
    match ctx.format {
        OutputFormat::Json => format!(
            "{}\n",
            serde_json::to_string_pretty(&serde_json::json!({
                "_type": "lint_preflight",
                "index": ctx.settings.index.to_string_lossy(),
                "issues": count,
            }))
            .unwrap_or_default()
        ),
        OutputFormat::Text => format!(
            "{}: {} issue(s)\n",
            ctx.settings.index.display(),
            count
        ),
    }
}
