use async_trait::async_trait;
use repo_analyzer::error::{AnalyzerError, Result};
use repo_analyzer::ModelGateway;
use std::path::Path;
use std::process::Command;

/// Gateway double returning a fixed response, or a fixed failure
pub struct FixedGateway {
    response: std::result::Result<String, String>,
}

impl FixedGateway {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl ModelGateway for FixedGateway {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.response.clone().map_err(AnalyzerError::Llm)
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git must be available for integration tests");
    assert!(status.success(), "git {:?} failed", args);
}

/// Creates a bare repository that clones successfully but contains nothing
pub fn init_empty_repo(dir: &Path) {
    git(dir, &["init", "--bare", "--quiet", "."]);
}

/// Creates a committed repository containing the given files
pub fn init_repo_with_files(dir: &Path, files: &[(&str, &str)]) {
    git(dir, &["init", "--quiet", "."]);
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    git(dir, &["add", "-A"]);
    git(
        dir,
        &[
            "-c",
            "user.email=tests@example.com",
            "-c",
            "user.name=tests",
            "commit",
            "--quiet",
            "-m",
            "initial",
        ],
    );
}
