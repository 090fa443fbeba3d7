//! Lint engine boundary.
//!
//! Engines push findings into an `IssueConsumer` as they discover them and
//! signal both the end of their input and the completion of the scan. The
//! production binding, `CommandEngine`, runs the linter as a child process
//! with a JSON formatter and replays its output through the consumer.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LintError, Result};
use crate::lint::resolver::{ConfigDescriptor, ConfigValue};
use crate::lint::types::LintCategory;

/// Receiver of engine events for one scan
pub trait IssueConsumer {
    /// Raw issues the engine found in `file` (project-relative when possible)
    fn on_issues(&mut self, file: &str, issues: &[Value]) -> Result<()>;

    /// All input files have been handed to the engine
    fn on_input_end(&mut self) -> Result<()>;

    /// The engine reports its scan as complete
    fn on_scan_complete(&mut self) -> Result<()>;
}

/// Everything an engine needs for one scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub config: ConfigDescriptor,
}

/// A lint engine that can scan a set of files
pub trait LintEngine: Send + Sync {
    fn name(&self) -> &str;

    fn scan(&self, request: &ScanRequest, consumer: &mut dyn IssueConsumer) -> Result<()>;
}

// ============================================================================
// Output shapes
// ============================================================================

/// How an engine lays out its JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputShape {
    /// `[{ <file_key>: "a.js", <issues_key>: [..] }, ..]`
    FileArray { file_key: String, issues_key: String },
    /// `{ "a.scss": [..], .. }`
    FileMap,
    /// `[{ <file_key>: "a.ts", ..issue }, ..]`
    FlatArray { file_key: String },
}

/// Split engine output into per-file raw issue batches, in report order.
///
/// Batches without a file name are dropped with a warning.
pub fn parse_output(
    shape: &OutputShape,
    output: &str,
    root: &Path,
) -> std::result::Result<Vec<(String, Vec<Value>)>, String> {
    Ok(split_batches(shape, output, root)?
        .into_iter()
        .filter(|(file, issues)| {
            if file.is_empty() {
                tracing::warn!("Dropping {} issue(s) reported without a file name", issues.len());
                return false;
            }
            true
        })
        .collect())
}

fn split_batches(
    shape: &OutputShape,
    output: &str,
    root: &Path,
) -> std::result::Result<Vec<(String, Vec<Value>)>, String> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    let json: Value = serde_json::from_str(output.trim()).map_err(|e| e.to_string())?;

    match shape {
        OutputShape::FileArray {
            file_key,
            issues_key,
        } => {
            let results = json.as_array().ok_or("expected a JSON array of file results")?;
            Ok(results
                .iter()
                .map(|result| {
                    let file = result.get(file_key).and_then(Value::as_str).unwrap_or("");
                    let issues = result
                        .get(issues_key)
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default();
                    (relative_file(file, root), issues)
                })
                .collect())
        }
        OutputShape::FileMap => {
            let obj = json.as_object().ok_or("expected a JSON object keyed by file")?;
            Ok(obj
                .iter()
                .map(|(file, issues)| {
                    let issues = issues.as_array().cloned().unwrap_or_default();
                    (relative_file(file, root), issues)
                })
                .collect())
        }
        OutputShape::FlatArray { file_key } => {
            let items = json.as_array().ok_or("expected a JSON array of issues")?;
            let mut grouped: Vec<(String, Vec<Value>)> = Vec::new();
            for item in items {
                let file = relative_file(
                    item.get(file_key).and_then(Value::as_str).unwrap_or(""),
                    root,
                );
                match grouped.iter_mut().find(|(name, _)| *name == file) {
                    Some((_, issues)) => issues.push(item.clone()),
                    None => grouped.push((file, vec![item.clone()])),
                }
            }
            Ok(grouped)
        }
    }
}

fn relative_file(file: &str, root: &Path) -> String {
    let path = Path::new(file);
    path.strip_prefix(root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file.to_string())
}

// ============================================================================
// Command engine
// ============================================================================

/// How the resolved config file is passed to an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigMode {
    /// Pass the config file path
    #[default]
    Path,
    /// Pass the config file contents, serialized inline
    Contents,
}

/// Invocation of an external linter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Flag that precedes the config value (e.g. `--config`)
    pub config_flag: String,
    pub config_mode: ConfigMode,
    pub shape: OutputShape,
}

impl EngineSpec {
    /// Default JSON-emitting engine for a category
    pub fn default_for(category: LintCategory) -> Self {
        let npx = |args: &[&str]| args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        match category {
            LintCategory::Script => Self {
                program: "npx".into(),
                args: npx(&["eslint", "--format", "json"]),
                config_flag: "--config".into(),
                config_mode: ConfigMode::Path,
                shape: OutputShape::FileArray {
                    file_key: "filePath".into(),
                    issues_key: "messages".into(),
                },
            },
            LintCategory::Stylesheet => Self {
                program: "npx".into(),
                args: npx(&["stylelint", "--formatter", "json"]),
                config_flag: "--config".into(),
                config_mode: ConfigMode::Path,
                shape: OutputShape::FileArray {
                    file_key: "source".into(),
                    issues_key: "warnings".into(),
                },
            },
            LintCategory::TypedScript => Self {
                program: "npx".into(),
                args: npx(&["tslint", "--format", "json"]),
                config_flag: "--config".into(),
                config_mode: ConfigMode::Path,
                shape: OutputShape::FlatArray {
                    file_key: "name".into(),
                },
            },
            LintCategory::Markup => Self {
                program: "npx".into(),
                args: npx(&["htmlhint", "--format", "json"]),
                config_flag: "--config".into(),
                config_mode: ConfigMode::Path,
                shape: OutputShape::FileArray {
                    file_key: "file".into(),
                    issues_key: "messages".into(),
                },
            },
        }
    }
}

/// Engine backed by an external linter process
#[derive(Debug, Clone)]
pub struct CommandEngine {
    name: String,
    spec: EngineSpec,
}

impl CommandEngine {
    pub fn new(spec: EngineSpec) -> Self {
        let name = spec
            .args
            .first()
            .filter(|_| spec.program == "npx")
            .cloned()
            .unwrap_or_else(|| spec.program.clone());
        Self { name, spec }
    }

    fn build_command(&self, program: &Path, request: &ScanRequest) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.spec.args);

        match &request.config.value {
            Some(ConfigValue::Path(path)) => {
                cmd.arg(&self.spec.config_flag).arg(path);
            }
            Some(ConfigValue::Contents(contents)) => {
                cmd.arg(&self.spec.config_flag).arg(contents);
            }
            None => {}
        }

        for file in &request.files {
            cmd.arg(file.strip_prefix(&request.root).unwrap_or(file));
        }

        cmd.current_dir(&request.root);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

impl LintEngine for CommandEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self, request: &ScanRequest, consumer: &mut dyn IssueConsumer) -> Result<()> {
        let program = which::which(&self.spec.program).map_err(|_| LintError::EngineNotFound {
            program: self.spec.program.clone(),
        })?;

        let child = self
            .build_command(&program, request)
            .spawn()
            .map_err(|e| LintError::EngineFailed {
                engine: self.name.clone(),
                message: format!("failed to start {}: {}", program.display(), e),
            })?;
        tracing::debug!(
            "Started {} on {} file(s)",
            self.name,
            request.files.len()
        );
        consumer.on_input_end()?;

        let output = child.wait_with_output().map_err(|e| LintError::EngineFailed {
            engine: self.name.clone(),
            message: e.to_string(),
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let exit_failure = || LintError::EngineFailed {
            engine: self.name.clone(),
            message: format!("exited with {}: {}", output.status, stderr.trim()),
        };

        // Some engines (stylelint 16+) write the formatted report to stderr
        let batches = if stdout.trim().is_empty() {
            match parse_output(&self.spec.shape, &stderr, &request.root) {
                Ok(batches) if !stderr.trim().is_empty() => {
                    tracing::debug!("{} reported on stderr", self.name);
                    batches
                }
                _ if output.status.success() => Vec::new(),
                _ => return Err(exit_failure()),
            }
        } else {
            parse_output(&self.spec.shape, &stdout, &request.root).map_err(|message| {
                if output.status.success() {
                    LintError::EngineOutput {
                        engine: self.name.clone(),
                        message,
                    }
                } else {
                    exit_failure()
                }
            })?
        };

        for (file, issues) in &batches {
            consumer.on_issues(file, issues)?;
        }
        consumer.on_scan_complete()
    }
}
