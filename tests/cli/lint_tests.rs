//! Tests for the lint task commands
//!
//! - `lint` - run all four categories
//! - `lint-js` / `lint-scss` / `lint-ts` / `lint-html` - one category
//! - `lint-html-index` - console-only check of the markup entry point

#![allow(unused_imports)]

use crate::common::{
    assert_contains, assert_json_type, assert_valid_json, count_error_entries, TestRepo,
    EMPTY_REPORT,
};

/// Point a category's engine at a local executable
fn engine_override(section: &str, program: &std::path::Path) -> String {
    format!(
        "[{}.engine]\nprogram = \"{}\"\nargs = []\n",
        section,
        program.display()
    )
}

// ============================================================================
// TASKS WITHOUT ENGINE INVOCATION
// ============================================================================

#[test]
fn test_lint_scss_without_sources_writes_empty_report() {
    let repo = TestRepo::new();

    let output = repo.run_cli(&["lint-scss"]).expect("Failed to run CLI");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "lint-scss failed: {stderr}");
    assert_contains(
        &stderr,
        "config/scss.json file is missing, using defaults.",
        "missing config warning",
    );
    assert_eq!(repo.read_file("target/scss-lint-result.xml"), EMPTY_REPORT);
}

#[test]
fn test_lint_all_json_summary() {
    let repo = TestRepo::new();
    repo.add_file("config/scss.json", "{}")
        .add_file("config/tslint.json", "{}")
        .add_file("config/htmllint.json", "{}");

    let output = repo.run_cli_success(&["lint", "-f", "json"]);
    let json = assert_valid_json(&output, "lint json");

    assert_json_type(&json, "lint_run");
    assert_eq!(json["success"], true);
    let runs = json["runs"].as_array().expect("runs array");
    assert_eq!(runs.len(), 4);
    for run in runs {
        assert_eq!(run["files_scanned"], 0);
        assert_eq!(run["issues"], 0);
    }
    assert!(repo.exists("target/es-lint-result.xml"));
    assert!(repo.exists("target/html-lint-result.xml"));
}

#[test]
fn test_lint_text_summary_lists_categories() {
    let repo = TestRepo::new();

    let output = repo.run_cli_success(&["lint"]);

    assert_contains(&output, "LINT: PASS", "status banner");
    for category in ["script", "stylesheet", "typed-script", "markup"] {
        assert_contains(&output, category, "category row");
    }
}

#[test]
fn test_output_dir_from_settings() {
    let repo = TestRepo::new();
    repo.add_file("lint.toml", "output_dir = \"build/reports\"\n");

    repo.run_cli_success(&["lint-ts"]);

    assert!(repo.exists("build/reports/ts-lint-result.xml"));
    assert!(!repo.exists("target/ts-lint-result.xml"));
}

#[test]
fn test_lint_html_index_without_index() {
    let repo = TestRepo::new();

    let output = repo.run_cli_success(&["lint-html-index"]);

    assert_contains(&output, "app/index.html: 0 issue(s)", "preflight summary");
    assert!(!repo.exists("target/html-lint-result.xml"));
}

// ============================================================================
// ERROR EXIT CODES
// ============================================================================

#[test]
fn test_missing_explicit_config_exits_2() {
    let repo = TestRepo::new();

    let (code, _stdout, stderr) = repo.run_cli_failure(&["lint", "--config", "missing.toml"]);

    assert_eq!(code, Some(2));
    assert_contains(&stderr, "Error: Invalid configuration", "config error");
}

#[test]
fn test_invalid_glob_exits_2() {
    let repo = TestRepo::new();
    repo.add_file("lint.toml", "[script]\ninclude = [\"app/[*.js\"]\n");

    let (code, _stdout, stderr) = repo.run_cli_failure(&["lint-js"]);

    assert_eq!(code, Some(2));
    assert_contains(&stderr, "Invalid file pattern", "pattern error");
}

#[test]
fn test_unknown_engine_exits_4() {
    let repo = TestRepo::new();
    repo.add_file("app/x.js", "foo;\n").add_file(
        "lint.toml",
        "[script.engine]\nprogram = \"lint-report-no-such-linter\"\n",
    );

    let (code, _stdout, stderr) = repo.run_cli_failure(&["lint-js"]);

    assert_eq!(code, Some(4));
    assert_contains(&stderr, "lint-report-no-such-linter", "engine name");
}

// ============================================================================
// SCRIPTED ENGINES
// ============================================================================

#[cfg(unix)]
#[test]
fn test_script_error_fails_task_after_writing_report() {
    let repo = TestRepo::new();
    repo.add_file("app/x.js", "foo();\n");
    let engine = repo.add_script(
        "bin/fake-eslint",
        r#"#!/bin/sh
cat <<'JSON'
[{"filePath":"app/x.js","messages":[{"ruleId":"no-undef","severity":2,"message":"'foo' is not defined","line":12,"column":5}],"errorCount":1}]
JSON
exit 1
"#,
    );
    repo.add_file("lint.toml", &engine_override("script", &engine));

    let (code, stdout, stderr) = repo.run_cli_failure(&["lint-js"]);

    assert_eq!(code, Some(1));
    assert_contains(
        &stderr,
        "app/x.js: 'foo' is not defined line 12 col. 5",
        "console issue line",
    );
    assert_contains(&stderr, "Error: script lint found 1 error(s)", "findings error");
    assert_contains(&stdout, "LINT: FAIL", "summary before failure");

    let report = repo.read_file("target/es-lint-result.xml");
    assert_eq!(count_error_entries(&report), 1);
    assert_contains(
        &report,
        "<error message=\"&apos;foo&apos; is not defined\" line=\"12\" severity=\"error\"/>",
        "error entry",
    );
}

#[cfg(unix)]
#[test]
fn test_script_warnings_do_not_fail_task() {
    let repo = TestRepo::new();
    repo.add_file("app/x.js", "var unused;\n");
    let engine = repo.add_script(
        "bin/fake-eslint",
        r#"#!/bin/sh
cat <<'JSON'
[{"filePath":"app/x.js","messages":[{"ruleId":"no-unused-vars","severity":1,"message":"'unused' is defined but never used","line":1,"column":5}]}]
JSON
"#,
    );
    repo.add_file("lint.toml", &engine_override("script", &engine));

    let output = repo.run_cli(&["lint-js"]).expect("Failed to run CLI");

    assert!(output.status.success());
    assert_eq!(
        count_error_entries(&repo.read_file("target/es-lint-result.xml")),
        1
    );
}

#[cfg(unix)]
#[test]
fn test_typed_script_flat_output_is_grouped_by_file() {
    let repo = TestRepo::new();
    repo.add_file("app/a.ts", "console.log(1);\n")
        .add_file("app/b.ts", "let b = 1;\n")
        .add_file("config/tslint.json", "{}");
    let engine = repo.add_script(
        "bin/fake-tslint",
        r#"#!/bin/sh
cat <<'JSON'
[{"name":"app/a.ts","failure":"Calls to 'console.log' are not allowed.","ruleSeverity":"error","startPosition":{"line":0,"position":0}},
 {"name":"app/a.ts","failure":"Missing semicolon","ruleSeverity":"warning","startPosition":{"line":0,"position":14}}]
JSON
exit 2
"#,
    );
    repo.add_file("lint.toml", &engine_override("typed_script", &engine));

    let stdout = repo.run_cli_success(&["lint-ts", "-f", "json"]);
    let json = assert_valid_json(&stdout, "lint-ts json");
    let report = repo.read_file("target/ts-lint-result.xml");

    assert_eq!(json["runs"][0]["files_scanned"], 2);
    assert_eq!(json["runs"][0]["files_with_issues"], 1);
    assert_eq!(report.matches("<file name=").count(), 1);
    assert_eq!(count_error_entries(&report), 2);
    assert_contains(&report, "line=\"1\"", "1-based line");
}

#[cfg(unix)]
#[test]
fn test_lint_html_index_echoes_issues() {
    let repo = TestRepo::new();
    repo.add_file("app/index.html", "<DIV></DIV>\n");
    let engine = repo.add_script(
        "bin/fake-htmlhint",
        r#"#!/bin/sh
cat <<'JSON'
[{"file":"app/index.html","messages":[{"type":"error","message":"Tag must be lowercase.","line":1,"col":1}]}]
JSON
"#,
    );
    repo.add_file("lint.toml", &engine_override("markup", &engine));

    let output = repo.run_cli(&["lint-html-index"]).expect("Failed to run CLI");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "lint-html-index failed: {stderr}");
    assert_contains(
        &stderr,
        "app/index.html: Tag must be lowercase. line 1 col. 1",
        "preflight console line",
    );
    assert_contains(&stdout, "1 issue(s)", "preflight count");
    assert!(!repo.exists("target/html-lint-result.xml"));
}

#[cfg(unix)]
#[test]
fn test_stylesheet_report_read_from_stderr() {
    let repo = TestRepo::new();
    repo.add_file("app/a.scss", "a { color: #FFF; }\n")
        .add_file("config/scss.json", "{}");
    let engine = repo.add_script(
        "bin/fake-stylelint",
        r##"#!/bin/sh
cat >&2 <<'JSON'
[{"source":"app/a.scss","warnings":[{"line":1,"column":12,"rule":"color-hex-case","severity":"error","text":"Expected \"#FFF\" to be \"#fff\" (color-hex-case)"}]}]
JSON
exit 2
"##,
    );
    repo.add_file("lint.toml", &engine_override("stylesheet", &engine));

    let output = repo.run_cli(&["lint-scss"]).expect("Failed to run CLI");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "lint-scss failed: {stderr}");
    assert_contains(
        &stderr,
        "app/a.scss: Expected \"#FFF\" to be \"#fff\" (color-hex-case) line 1 col. 12",
        "console issue line",
    );
    let report = repo.read_file("target/scss-lint-result.xml");
    assert_eq!(count_error_entries(&report), 1);
    assert_contains(&report, "<file name=\"app/a.scss\">", "file entry");
}

#[cfg(unix)]
#[test]
fn test_scss_lint_file_map_binding() {
    let repo = TestRepo::new();
    repo.add_file("app/a.scss", "a { content: \"x\"; }\n")
        .add_file("config/scss.json", "{}");
    let engine = repo.add_script(
        "bin/fake-scss-lint",
        r#"#!/bin/sh
cat <<'JSON'
{"app/a.scss":[{"line":1,"column":14,"length":3,"severity":"warning","reason":"Prefer single quoted strings","linter":"StringQuotes"}]}
JSON
exit 1
"#,
    );
    repo.add_file(
        "lint.toml",
        &format!(
            "{}shape = {{ kind = \"file_map\" }}\n\n[stylesheet.fields]\nmessage = \"reason\"\n",
            engine_override("stylesheet", &engine)
        ),
    );

    let output = repo.run_cli(&["lint-scss"]).expect("Failed to run CLI");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "lint-scss failed: {stderr}");
    assert_contains(
        &stderr,
        "app/a.scss: Prefer single quoted strings line 1 col. 14",
        "console issue line",
    );
    assert_contains(
        &repo.read_file("target/scss-lint-result.xml"),
        "<error message=\"Prefer single quoted strings\" line=\"1\" severity=\"error\"/>",
        "error entry",
    );
}

#[cfg(unix)]
#[test]
fn test_engine_crash_exits_4() {
    let repo = TestRepo::new();
    repo.add_file("app/x.js", "foo();\n");
    let engine = repo.add_script(
        "bin/fake-eslint",
        r#"#!/bin/sh
echo "Oops! Something went wrong!"
echo "ESLint couldn't find a configuration file." >&2
exit 3
"#,
    );
    repo.add_file("lint.toml", &engine_override("script", &engine));

    let (code, _stdout, stderr) = repo.run_cli_failure(&["lint-js"]);

    assert_eq!(code, Some(4));
    assert_contains(&stderr, "failed: exited with", "engine failure");
    assert_contains(
        &stderr,
        "ESLint couldn't find a configuration file.",
        "engine stderr",
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_output_with_success_exits_4() {
    let repo = TestRepo::new();
    repo.add_file("app/x.js", "foo();\n");
    let engine = repo.add_script(
        "bin/fake-eslint",
        r#"#!/bin/sh
echo "app/x.js: line 1, col 1, Error - 'foo' is not defined."
exit 0
"#,
    );
    repo.add_file("lint.toml", &engine_override("script", &engine));

    let (code, _stdout, stderr) = repo.run_cli_failure(&["lint-js"]);

    assert_eq!(code, Some(4));
    assert_contains(&stderr, "Could not read output of lint engine", "output error");
}
