// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Diagnostic checks for the organizer pipeline and inference engine
//!
//! Each check returns a `CheckResult` record; rendering lives in
//! [`report`]. Check logic never prints.

pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::collector::{collect_file_paths, CollectOptions};
use crate::config::AppConfig;
use crate::engine::{EngineClient, TextInference};
use crate::planner::{self, OrganizeMode};

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warn => write!(f, "WARN"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result record produced by one diagnostic check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    fn warn(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }

    fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }
}

/// Options for a diagnostic run
#[derive(Debug, Clone)]
pub struct DoctorOptions {
    /// Skip engine reachability, model, and completion checks
    pub skip_engine: bool,
    /// How many discovered files the readability check samples
    pub sample_limit: usize,
}

impl Default for DoctorOptions {
    fn default() -> Self {
        Self {
            skip_engine: false,
            sample_limit: 3,
        }
    }
}

/// Run the diagnostic suite against the given configuration
pub async fn run_checks(config: &AppConfig, options: &DoctorOptions) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let source = PathBuf::from(&config.source);
    results.push(check_source_directory(&source));

    let (discovery, files) = check_file_discovery(config, &source);
    results.push(discovery);

    results.push(check_file_readability(&files, options.sample_limit));

    let destination = PathBuf::from(&config.destination);
    results.push(check_planning(OrganizeMode::Date, &files, &destination));
    results.push(check_planning(OrganizeMode::Type, &files, &destination));

    if !options.skip_engine {
        let client = EngineClient::new(&config.engine);

        let reachability = check_engine_reachable(&client).await;
        let reachable = reachability.status != CheckStatus::Fail;
        results.push(reachability);

        if reachable {
            results.push(check_model_available(&client, &config.engine.model).await);
            results.push(check_completion(&client).await);
        }
    }

    results
}

fn check_source_directory(source: &Path) -> CheckResult {
    const NAME: &str = "source-directory";

    if source.is_dir() {
        CheckResult::pass(NAME, format!("{} exists", source.display()))
    } else if source.exists() {
        CheckResult::fail(NAME, format!("{} is not a directory", source.display()))
    } else {
        CheckResult::fail(NAME, format!("{} not found", source.display()))
    }
}

fn check_file_discovery(config: &AppConfig, source: &Path) -> (CheckResult, Vec<PathBuf>) {
    const NAME: &str = "file-discovery";

    let options = match CollectOptions::from_patterns(&config.collector.exclude) {
        Ok(o) => o,
        Err(e) => return (CheckResult::fail(NAME, e.to_string()), Vec::new()),
    };

    match collect_file_paths(source, &options) {
        Ok(files) if files.is_empty() => {
            (CheckResult::warn(NAME, "no files found"), files)
        }
        Ok(files) => {
            let result = CheckResult::pass(NAME, format!("{} files found", files.len()));
            (result, files)
        }
        Err(e) => (CheckResult::fail(NAME, e.to_string()), Vec::new()),
    }
}

fn check_file_readability(files: &[PathBuf], sample_limit: usize) -> CheckResult {
    const NAME: &str = "file-readability";

    if files.is_empty() {
        return CheckResult::warn(NAME, "no files to sample");
    }

    let sample: Vec<_> = files.iter().take(sample_limit).collect();
    let mut readable = 0;
    let mut last_error = String::new();

    for path in &sample {
        match std::fs::read(path) {
            Ok(_) => readable += 1,
            Err(e) => last_error = format!("{}: {}", path.display(), e),
        }
    }

    if readable == sample.len() {
        CheckResult::pass(NAME, format!("read {} of {} sampled files", readable, sample.len()))
    } else if readable > 0 {
        CheckResult::warn(
            NAME,
            format!("read {} of {} sampled files, last error: {}", readable, sample.len(), last_error),
        )
    } else {
        CheckResult::fail(NAME, format!("no sampled file was readable, last error: {}", last_error))
    }
}

fn check_planning(mode: OrganizeMode, files: &[PathBuf], destination: &Path) -> CheckResult {
    let name = match mode {
        OrganizeMode::Date => "date-planning",
        OrganizeMode::Type => "type-planning",
    };

    let plan = planner::plan(mode, files, destination);
    if plan.len() == files.len() {
        CheckResult::pass(name, format!("generated {} operations", plan.len()))
    } else {
        // Planning is total over its input; a length mismatch means a bug
        CheckResult::fail(
            name,
            format!("{} operations for {} files", plan.len(), files.len()),
        )
    }
}

async fn check_engine_reachable(client: &EngineClient) -> CheckResult {
    const NAME: &str = "engine-reachability";

    match client.health_check().await {
        Ok(()) => CheckResult::pass(NAME, format!("engine responding at {}", client.base_url())),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_model_available(client: &EngineClient, model: &str) -> CheckResult {
    const NAME: &str = "model-availability";

    match client.model_available(model).await {
        Ok(true) => CheckResult::pass(NAME, format!("model '{}' available", model)),
        Ok(false) => CheckResult::warn(NAME, format!("model '{}' not found, try pulling it", model)),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_completion(engine: &dyn TextInference) -> CheckResult {
    const NAME: &str = "completion";

    match engine.complete("Reply with the single word: ready").await {
        Ok(text) if text.trim().is_empty() => {
            CheckResult::warn(NAME, "completion returned empty text")
        }
        Ok(text) => CheckResult::pass(NAME, format!("completion returned {} chars", text.len())),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CuratorError, Result};
    use async_trait::async_trait;
    use std::fs;

    fn fs_only() -> DoctorOptions {
        DoctorOptions {
            skip_engine: true,
            ..DoctorOptions::default()
        }
    }

    fn status_of<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
        results.iter().find(|r| r.name == name).unwrap()
    }

    #[tokio::test]
    async fn healthy_tree_passes_filesystem_checks() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("sample");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.jpg"), b"img").unwrap();
        fs::write(source.join("b.pdf"), b"pdf").unwrap();

        let mut config = AppConfig::default();
        config.source = source.to_string_lossy().to_string();
        config.destination = dir.path().join("out").to_string_lossy().to_string();

        let results = run_checks(&config, &fs_only()).await;
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
        assert_eq!(status_of(&results, "file-discovery").detail, "2 files found");
    }

    #[tokio::test]
    async fn missing_source_fails_discovery() {
        let mut config = AppConfig::default();
        config.source = "/no/such/source".to_string();

        let results = run_checks(&config, &fs_only()).await;
        assert_eq!(status_of(&results, "source-directory").status, CheckStatus::Fail);
        assert_eq!(status_of(&results, "file-discovery").status, CheckStatus::Fail);
        // Planning stays total over the empty file list
        assert_eq!(status_of(&results, "type-planning").status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn empty_source_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.source = dir.path().to_string_lossy().to_string();

        let results = run_checks(&config, &fs_only()).await;
        assert_eq!(status_of(&results, "file-discovery").status, CheckStatus::Warn);
        assert_eq!(status_of(&results, "file-readability").status, CheckStatus::Warn);
    }

    struct StubEngine {
        reply: Result<&'static str>,
    }

    #[async_trait]
    impl TextInference for StubEngine {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            match &self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(_) => Err(CuratorError::EngineUnavailable("stub down".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn completion_check_passes_on_text() {
        let engine = StubEngine { reply: Ok("ready") };
        let result = check_completion(&engine).await;
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn completion_check_warns_on_empty() {
        let engine = StubEngine { reply: Ok("   ") };
        let result = check_completion(&engine).await;
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn completion_check_fails_on_error() {
        let engine = StubEngine {
            reply: Err(CuratorError::EngineUnavailable("down".to_string())),
        };
        let result = check_completion(&engine).await;
        assert_eq!(result.status, CheckStatus::Fail);
    }
}
