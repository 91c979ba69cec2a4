//! Orchestration of the analysis pipeline.
//!
//! The repository path runs clone, probe, build, test, collect, prompt,
//! model call, and normalization as one linear sequence. Everything after
//! workspace acquisition executes inside an inner future so the workspace is
//! released exactly once on every exit, success or failure.

use std::path::Path;
use std::sync::Arc;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::{DiffRequest, HealthReport, RepositoryAnalysis};
use crate::collect;
use crate::command;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::gateway::ModelGateway;
use crate::normalize;
use crate::probe;
use crate::prompt;
use crate::workspace;

/// Analysis pipeline orchestrator
///
/// Holds the model gateway injected at process start; one instance serves
/// all requests and carries no per-request state.
pub struct Analyzer {
    gateway: Arc<dyn ModelGateway>,
    config: Arc<Config>,
}

impl Analyzer {
    /// Creates an orchestrator from an injected gateway and configuration
    pub fn new(gateway: Arc<dyn ModelGateway>, config: Arc<Config>) -> Self {
        Self { gateway, config }
    }

    /// Clones and analyzes a repository, returning health signals and a
    /// model-produced summary
    ///
    /// Clone failures surface as [`AnalyzerError::CloneFailed`] so callers
    /// can report them as client errors; every other failure is
    /// server-side. The scratch workspace is removed before returning, no
    /// matter which way the pipeline exits.
    pub async fn analyze_repository(&self, repo_url: &str) -> Result<RepositoryAnalysis> {
        // Platform links sometimes carry tracking query strings; git wants
        // the bare URL.
        let clean_url = repo_url.split('?').next().unwrap_or(repo_url).to_string();
        info!("analyzing repository {}", clean_url);

        let workspace = workspace::acquire()?;
        let result = self.run_repository_stages(&clean_url, &workspace).await;
        workspace::release(&workspace);
        result
    }

    async fn run_repository_stages(
        &self,
        repo_url: &str,
        workspace: &Path,
    ) -> Result<RepositoryAnalysis> {
        let timeout = self.config.command_timeout();

        let clone = command::run_program(
            "git",
            &["clone", repo_url, "."],
            workspace,
            timeout,
        )
        .await;
        if !clone.success {
            return Err(AnalyzerError::CloneFailed(clone.stderr.trim().to_string()));
        }

        let project_type = probe::classify(workspace);
        info!("detected project type {:?}", project_type);

        let readme_path = workspace.join("README.md");
        let readme_content = if readme_path.is_file() {
            let bytes = std::fs::read(&readme_path)?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::new()
        };

        let build = command::run_with_timeout(project_type.install_command(), workspace, timeout).await;
        if !build.success {
            warn!("install command failed: {}", build.stderr.trim());
        }

        let tests_found_and_passed = if probe::has_test_assets(workspace) {
            command::run_with_timeout(project_type.test_command(), workspace, timeout)
                .await
                .success
        } else {
            false
        };

        let health_report = HealthReport {
            readme_is_present: readme_path.is_file(),
            build_successful: build.success,
            tests_found_and_passed,
        };

        let source_code = collect::collect(workspace, self.config.max_source_chars);
        let prompt_text = prompt::repository_summary(&readme_content, &source_code);
        let response = self.gateway.complete(&prompt_text).await?;
        let summary = normalize::normalize_summary(&response);

        Ok(RepositoryAnalysis::new(health_report, summary))
    }

    /// Analyzes a git diff against a prior summary
    ///
    /// No workspace is involved. The result always carries the three
    /// required keys; only a gateway failure is an error.
    pub async fn analyze_diff(&self, request: &DiffRequest) -> Result<Value> {
        info!("analyzing diff for project {}", request.project_title);

        let prompt_text = prompt::diff_analysis(
            &request.diff,
            &request.previous_summary,
            &request.project_title,
        );
        let response = self.gateway.complete(&prompt_text).await?;
        Ok(normalize::normalize_diff(&response, &request.previous_summary))
    }
}
