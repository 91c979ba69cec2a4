//! Execution of external commands inside a workspace.
//!
//! Build and test commands come from the cloned repository's own ecosystem,
//! so every failure mode (non-zero exit, missing binary, spawn error,
//! timeout) collapses into `success = false` instead of an error; callers
//! only ever branch on the boolean.

use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured outcome of one external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command ran to completion with a zero exit status
    pub success: bool,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message,
        }
    }
}

/// Runs a shell command with the given working directory, no time bound
pub async fn run(command_line: &str, cwd: &Path) -> CommandOutput {
    run_with_timeout(command_line, cwd, None).await
}

/// Runs a shell command with the given working directory
///
/// When `timeout` is set, a command still running once it elapses is killed
/// and reported as failed. `None` leaves execution unbounded.
pub async fn run_with_timeout(
    command_line: &str,
    cwd: &Path,
    timeout: Option<Duration>,
) -> CommandOutput {
    debug!("running `{}` in {}", command_line, cwd.display());

    let mut command = shell_command(command_line);
    command.current_dir(cwd).kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("command `{}` timed out after {:?}", command_line, limit);
                return CommandOutput::failed(format!(
                    "command timed out after {} seconds",
                    limit.as_secs()
                ));
            }
        },
        None => command.output().await,
    };

    match output {
        Ok(output) => {
            let result = CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };
            if !result.success {
                debug!(
                    "command `{}` exited with {:?}",
                    command_line,
                    output.status.code()
                );
            }
            result
        }
        Err(e) => {
            warn!("failed to launch `{}`: {}", command_line, e);
            CommandOutput::failed(e.to_string())
        }
    }
}

/// Runs a program with explicit arguments, bypassing the shell
///
/// Used where an argument comes from untrusted request input (the clone
/// URL); the ecosystem build/test commands go through [`run`] since they are
/// fixed strings.
pub async fn run_program(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Option<Duration>,
) -> CommandOutput {
    debug!("running `{} {}` in {}", program, args.join(" "), cwd.display());

    let mut command = Command::new(program);
    command.args(args).current_dir(cwd).kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("command `{}` timed out after {:?}", program, limit);
                return CommandOutput::failed(format!(
                    "command timed out after {} seconds",
                    limit.as_secs()
                ));
            }
        },
        None => command.output().await,
    };

    match output {
        Ok(output) => CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => {
            warn!("failed to launch `{}`: {}", program, e);
            CommandOutput::failed(e.to_string())
        }
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_successful_command() {
        let dir = TempDir::new().unwrap();
        let result = run("echo hello", dir.path()).await;
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let result = run("exit 3", dir.path()).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_missing_binary_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let result = run("definitely-not-a-real-binary-5309", dir.path()).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "present").unwrap();
        let result = run("cat marker.txt", dir.path()).await;
        assert!(result.success);
        assert_eq!(result.stdout, "present");
    }

    #[tokio::test]
    async fn test_timeout_maps_to_failure() {
        let dir = TempDir::new().unwrap();
        let result =
            run_with_timeout("sleep 5", dir.path(), Some(Duration::from_millis(100))).await;
        assert!(!result.success);
        assert!(result.stderr.contains("timed out"));
    }

    #[tokio::test]
    async fn test_stderr_captured() {
        let dir = TempDir::new().unwrap();
        let result = run("echo oops 1>&2", dir.path()).await;
        assert!(result.success);
        assert_eq!(result.stderr.trim(), "oops");
    }
}
