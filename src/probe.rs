//! Toolchain classification and test-asset detection for checked-out trees.

use std::path::Path;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::collect::IGNORE_DIRS;

/// Project toolchain detected from manifest files at the repository root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Node.js project (`package.json` present)
    NodeJs,
    /// Python project (`requirements.txt` present)
    Python,
    /// No recognized manifest; treated like Python for command selection
    Unknown,
}

impl ProjectType {
    /// Dependency-install command for this toolchain
    pub fn install_command(&self) -> &'static str {
        match self {
            ProjectType::NodeJs => "npm install",
            ProjectType::Python | ProjectType::Unknown => "pip install -r requirements.txt",
        }
    }

    /// Test-runner command for this toolchain
    pub fn test_command(&self) -> &'static str {
        match self {
            ProjectType::NodeJs => "npm test",
            ProjectType::Python | ProjectType::Unknown => "pytest",
        }
    }
}

/// Classifies a checked-out tree by the manifest files at its root
pub fn classify(path: &Path) -> ProjectType {
    if path.join("package.json").is_file() {
        ProjectType::NodeJs
    } else if path.join("requirements.txt").is_file() {
        ProjectType::Python
    } else {
        ProjectType::Unknown
    }
}

// File names that indicate test code across the supported ecosystems.
static TEST_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(test_.*\.py|.*_test\.py|.*\.(test|spec)\.(js|jsx|ts|tsx))$").unwrap()
});

const TEST_DIR_NAMES: &[&str] = &["test", "tests", "__tests__"];

/// Returns true iff at least one test file exists anywhere under the tree
///
/// A file counts as a test when its name matches a conventional test naming
/// pattern, or when it sits directly inside a `test`/`tests`/`__tests__`
/// directory. Ignored directories are never descended into.
pub fn has_test_assets(path: &Path) -> bool {
    WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && IGNORE_DIRS.contains(&name.as_ref()))
        })
        .filter_map(|e| e.ok())
        .any(|entry| {
            if !entry.file_type().is_file() {
                return false;
            }
            let name = entry.file_name().to_string_lossy();
            if TEST_FILE_PATTERN.is_match(&name) {
                return true;
            }
            entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|dir| TEST_DIR_NAMES.contains(&dir.to_string_lossy().as_ref()))
                .unwrap_or(false)
        })
}
