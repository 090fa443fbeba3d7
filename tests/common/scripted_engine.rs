//! In-process lint engine that replays canned findings

use std::sync::Mutex;

use serde_json::Value;

use lint_report::lint::{EngineSet, IssueConsumer, LintCategory, LintEngine, ScanRequest};
use lint_report::{LintError, Result};

/// Engine that reports a fixed list of per-file batches
pub struct ScriptedEngine {
    name: String,
    batches: Vec<(String, Vec<Value>)>,
    failure: Option<String>,
    requests: Mutex<Vec<ScanRequest>>,
}

impl ScriptedEngine {
    /// Engine that finds nothing
    pub fn clean(name: &str) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn new(name: &str, batches: Vec<(&str, Vec<Value>)>) -> Self {
        Self {
            name: name.to_string(),
            batches: batches
                .into_iter()
                .map(|(file, issues)| (file.to_string(), issues))
                .collect(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Engine whose scan fails without reporting anything
    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::clean(name)
        }
    }

    /// Every scan request received so far
    pub fn requests(&self) -> Vec<ScanRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LintEngine for ScriptedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self, request: &ScanRequest, consumer: &mut dyn IssueConsumer) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.failure {
            return Err(LintError::EngineFailed {
                engine: self.name.clone(),
                message: message.clone(),
            });
        }
        consumer.on_input_end()?;
        for (file, issues) in &self.batches {
            consumer.on_issues(file, issues)?;
        }
        consumer.on_scan_complete()
    }
}

/// One scripted engine per category
pub struct ScriptedEngines {
    pub script: ScriptedEngine,
    pub stylesheet: ScriptedEngine,
    pub typed_script: ScriptedEngine,
    pub markup: ScriptedEngine,
}

impl ScriptedEngines {
    pub fn clean() -> Self {
        Self {
            script: ScriptedEngine::clean("eslint"),
            stylesheet: ScriptedEngine::clean("stylelint"),
            typed_script: ScriptedEngine::clean("tslint"),
            markup: ScriptedEngine::clean("htmlhint"),
        }
    }
}

impl EngineSet for ScriptedEngines {
    fn engine(&self, category: LintCategory) -> &dyn LintEngine {
        match category {
            LintCategory::Script => &self.script,
            LintCategory::Stylesheet => &self.stylesheet,
            LintCategory::TypedScript => &self.typed_script,
            LintCategory::Markup => &self.markup,
        }
    }
}
