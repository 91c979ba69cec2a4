//! Bounded aggregation of a repository's source text.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

// Extensions worth showing to the model
pub(crate) const SOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".py", ".html", ".css", ".jsx", ".ts", ".tsx", ".java", ".go", ".rs",
];

/// Directory names skipped during any tree walk
pub const IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "venv",
    ".venv",
    "__pycache__",
    "target",
];

/// Walks a checked-out tree and concatenates readable source text
///
/// Each qualifying file contributes a `--- File: <name> ---` block. Files
/// are decoded permissively (invalid UTF-8 is dropped) and files that fail
/// to open are skipped. The walk stops as soon as the accumulated text
/// exceeds `max_chars`, truncating to exactly that many characters even if
/// it cuts a file mid-stream.
pub fn collect(path: &Path, max_chars: usize) -> String {
    let mut content = String::new();

    for entry in WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && IGNORE_DIRS.contains(&name.as_ref()))
        })
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            continue;
        }

        let bytes = match fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        let text = String::from_utf8_lossy(&bytes);
        content.push_str(&format!("--- File: {} ---\n{}\n\n", name, text));

        if content.chars().count() > max_chars {
            return content.chars().take(max_chars).collect();
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_truncates_to_exact_budget() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.py"), "x".repeat(100)).unwrap();

        let collected = collect(dir.path(), 10);
        assert_eq!(collected.chars().count(), 10);
    }

    #[test]
    fn test_formats_file_blocks() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();

        let collected = collect(dir.path(), 15000);
        assert!(collected.starts_with("--- File: app.js ---\n"));
        assert!(collected.contains("console.log(1);"));
        assert!(collected.ends_with("\n\n"));
    }

    #[test]
    fn test_skips_ignored_directories() {
        let dir = TempDir::new().unwrap();
        let vendored = dir.path().join("node_modules");
        fs::create_dir(&vendored).unwrap();
        fs::write(vendored.join("dep.js"), "module.exports = {};").unwrap();
        fs::write(dir.path().join("index.js"), "main();").unwrap();

        let collected = collect(dir.path(), 15000);
        assert!(collected.contains("index.js"));
        assert!(!collected.contains("dep.js"));
    }

    #[test]
    fn test_skips_non_source_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.bin"), vec![0u8; 64]).unwrap();
        fs::write(dir.path().join("notes.txt"), "plain text").unwrap();

        let collected = collect(dir.path(), 15000);
        assert!(collected.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_dropped_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("weird.rs"), [b'f', b'n', 0xFF, 0xFE, b'!']).unwrap();

        let collected = collect(dir.path(), 15000);
        assert!(collected.contains("--- File: weird.rs ---"));
        assert!(collected.contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_tree_yields_empty_string() {
        let dir = TempDir::new().unwrap();
        assert_eq!(collect(dir.path(), 15000), "");
    }
}
