//! Ephemeral per-request workspaces.
//!
//! Each analysis request gets its own uniquely named scratch directory which
//! is removed unconditionally when the request finishes. Cloned trees can
//! carry read-only files (git object stores on some platforms), so removal
//! clears the read-only bit and retries once before giving up on a path.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::Result;

const WORKSPACE_PREFIX: &str = "repo-analyzer-";

/// Creates a uniquely named empty directory under the system temp dir
///
/// The caller owns the directory and must pass it to [`release`] when done;
/// nothing is cleaned up automatically.
pub fn acquire() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .suffix(&format!("-{}", uuid::Uuid::new_v4().simple()))
        .tempdir()?;
    // Detach from TempDir's drop-based cleanup; release() owns deletion.
    Ok(dir.into_path())
}

/// Recursively deletes a workspace directory
///
/// Idempotent: a path that no longer exists is not an error. Deletion
/// failures are retried once after clearing the read-only attribute on the
/// offending entry; anything still failing after that is logged and
/// swallowed so cleanup problems never mask the request's primary outcome.
pub fn release(path: &Path) {
    if !path.exists() {
        return;
    }

    if let Err(first) = fs::remove_dir_all(path) {
        warn!(
            "workspace removal failed ({}), clearing read-only attributes and retrying",
            first
        );
        clear_readonly_tree(path);
        if let Err(second) = fs::remove_dir_all(path) {
            warn!(
                "failed to remove workspace {} after retry: {}",
                path.display(),
                second
            );
        }
    }
}

/// Clears the read-only bit on every entry under `path`, including `path`
fn clear_readonly_tree(path: &Path) {
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        clear_readonly(entry.path());
    }
}

fn clear_readonly(path: &Path) {
    if let Ok(metadata) = path.symlink_metadata() {
        let mut permissions = metadata.permissions();
        if permissions.readonly() {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                permissions.set_mode(permissions.mode() | 0o700);
            }
            #[cfg(not(unix))]
            permissions.set_readonly(false);
            if let Err(e) = fs::set_permissions(path, permissions) {
                warn!("could not clear read-only bit on {}: {}", path.display(), e);
            }
        }
    }
}
