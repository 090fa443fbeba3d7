//! Error types and exit codes for lint-report

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for lint-report operations
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Lint engine '{program}' was not found on PATH")]
    EngineNotFound { program: String },

    #[error("Lint engine '{engine}' failed: {message}")]
    EngineFailed { engine: String, message: String },

    #[error("Could not read output of lint engine '{engine}': {message}")]
    EngineOutput { engine: String, message: String },

    #[error("Failed to write report {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    #[error("Report for {category} is already finalized")]
    ReportFinalized { category: String },

    #[error("{category} lint found {count} error(s)")]
    Findings { category: String, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// Convert error to process exit code:
    /// - 0: Success
    /// - 1: Findings in a fail-fast category
    /// - 2: Configuration or pattern error
    /// - 3: Report output / IO failure
    /// - 4: Lint engine failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Findings { .. } => ExitCode::from(1),
            Self::Config { .. } | Self::Pattern { .. } => ExitCode::from(2),
            Self::ReportWrite { .. } | Self::ReportFinalized { .. } | Self::Io(_) => {
                ExitCode::from(3)
            }
            Self::EngineNotFound { .. } | Self::EngineFailed { .. } | Self::EngineOutput { .. } => {
                ExitCode::from(4)
            }
        }
    }

    /// Whether this error only reports lint findings (as opposed to a broken run)
    pub fn is_findings(&self) -> bool {
        matches!(self, Self::Findings { .. })
    }
}

/// Result type alias for lint-report operations
pub type Result<T> = std::result::Result<T, LintError>;
