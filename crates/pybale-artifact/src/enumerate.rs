//! Tree enumeration: capture a directory as a file set.

use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use pybale_core::{FileRef, FileSet, TreeEnumerator};

/// Walks a directory tree and returns every matching regular file, keyed by
/// forward-slashed root-relative path.
#[derive(Debug, Default)]
pub struct WalkdirEnumerator;

impl TreeEnumerator for WalkdirEnumerator {
    fn enumerate(&self, pattern: &str, root: &Path) -> Result<FileSet> {
        let mut files = FileSet::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            if !matches(pattern, &rel) {
                continue;
            }

            #[cfg(unix)]
            let mode = {
                use std::os::unix::fs::PermissionsExt;
                let meta = entry
                    .metadata()
                    .with_context(|| format!("stat {}", entry.path().display()))?;
                meta.permissions().mode() & 0o7777
            };
            #[cfg(not(unix))]
            let mode = pybale_core::fileset::DEFAULT_FILE_MODE;

            files.insert(rel, FileRef::on_disk(entry.path(), mode));
        }
        tracing::debug!(files = files.len(), root = %root.display(), "enumerated tree");
        Ok(files)
    }
}

/// Glob-lite matching: `**` (or empty) takes everything, `**/*<suffix>` and
/// `*<suffix>` match by suffix (the latter only at the top level), anything
/// else matches an exact path or a directory prefix.
fn matches(pattern: &str, rel: &str) -> bool {
    if pattern.is_empty() || pattern == "**" {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix("**/*") {
        return rel.ends_with(suffix);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return rel.ends_with(suffix) && !rel.contains('/');
    }
    rel == pattern || rel.starts_with(&format!("{pattern}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("api")).unwrap();
        fs::create_dir_all(root.path().join("pybale_shim")).unwrap();
        fs::write(root.path().join("index.py"), "app").unwrap();
        fs::write(root.path().join("api/v1.py"), "v1").unwrap();
        fs::write(root.path().join("pybale_shim/handler.py"), "shim").unwrap();
        fs::write(root.path().join("README.md"), "docs").unwrap();
        root
    }

    #[test]
    fn test_enumerate_everything() {
        let root = tree();
        let files = WalkdirEnumerator.enumerate("**", root.path()).unwrap();
        let keys: Vec<_> = files.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["README.md", "api/v1.py", "index.py", "pybale_shim/handler.py"]
        );
    }

    #[test]
    fn test_enumerate_by_suffix() {
        let root = tree();
        let files = WalkdirEnumerator.enumerate("**/*.py", root.path()).unwrap();
        assert!(files.contains_key("api/v1.py"));
        assert!(!files.contains_key("README.md"));

        let top = WalkdirEnumerator.enumerate("*.py", root.path()).unwrap();
        assert!(top.contains_key("index.py"));
        assert!(!top.contains_key("api/v1.py"));
    }

    #[test]
    fn test_enumerate_directory_prefix() {
        let root = tree();
        let files = WalkdirEnumerator.enumerate("api", root.path()).unwrap();
        let keys: Vec<_> = files.keys().cloned().collect();
        assert_eq!(keys, vec!["api/v1.py"]);
    }

    #[test]
    fn test_enumerated_refs_are_readable() {
        let root = tree();
        let files = WalkdirEnumerator.enumerate("**", root.path()).unwrap();
        assert_eq!(files["index.py"].read().unwrap(), b"app");
    }
}
