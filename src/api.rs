//! Request and response payload types for the two analysis operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for analyzing a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// URL of the repository to clone and analyze
    pub repo_url: String,
}

/// Request payload for analyzing an incremental code change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRequest {
    /// The git diff text to analyze
    pub diff: String,
    /// Prior project summary the diff builds on, if any
    #[serde(default)]
    pub previous_summary: String,
    /// Display name of the project the diff belongs to
    #[serde(default = "default_project_title")]
    pub project_title: String,
}

fn default_project_title() -> String {
    "Project".to_string()
}

/// Minimal health signals derived from a cloned repository
///
/// Every field degrades to `false` rather than erroring: a missing README,
/// a failed build, or absent tests are findings, not failures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    /// Whether a README.md exists at the repository root
    pub readme_is_present: bool,
    /// Whether the ecosystem's install command exited successfully
    pub build_successful: bool,
    /// Whether test files exist and the test command passed
    pub tests_found_and_passed: bool,
}

/// Complete result of a repository analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    /// Derived health signals
    pub health_report: HealthReport,
    /// Backward-compatible alias carrying the same value as `health_report`
    pub health: HealthReport,
    /// Model-produced summary: either the six-key object or the
    /// parse-failure shape
    pub summary: Value,
}

impl RepositoryAnalysis {
    /// Bundles a health report with the normalized summary
    pub fn new(health_report: HealthReport, summary: Value) -> Self {
        Self {
            health_report,
            health: health_report,
            summary,
        }
    }
}
