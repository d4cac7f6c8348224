//! Dependency-manifest conventions and discovery.
//!
//! Discovery is a pure ancestor search: starting from the entrypoint's
//! directory and walking toward the source root (inclusive), the first
//! directory containing the conventional file wins. Absence is `None`,
//! never an error.

use std::path::{Path, PathBuf};

/// Language dependency manifest, scanned at a single point.
pub const PIP_MANIFEST: &str = "requirements.txt";

/// Lifecycle slots at which a system-package manifest is scanned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemManifestSlot {
    /// Before any language-package work.
    Pre,
    /// Alongside the language manifest, before the project requirements
    /// install.
    Main,
    /// After all language packages.
    Post,
}

impl SystemManifestSlot {
    pub fn file_name(&self) -> &'static str {
        match self {
            SystemManifestSlot::Pre => "pre-requirements.apt",
            SystemManifestSlot::Main => "requirements.apt",
            SystemManifestSlot::Post => "post-requirements.apt",
        }
    }
}

impl std::fmt::Display for SystemManifestSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SystemManifestSlot::Pre => "pre",
            SystemManifestSlot::Main => "main",
            SystemManifestSlot::Post => "post",
        };
        f.write_str(name)
    }
}

/// Search `start_dir` and its ancestors up to and including `stop_dir` for
/// `file_name`. Returns the nearest match. If `start_dir` is not under
/// `stop_dir` the walk ends at the filesystem root.
pub fn find_manifest(start_dir: &Path, stop_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut dir = start_dir;
    loop {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            tracing::debug!(manifest = %candidate.display(), "discovered manifest");
            return Some(candidate);
        }
        if dir == stop_dir {
            return None;
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_found_in_start_dir() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("api/v1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(PIP_MANIFEST), "flask\n").unwrap();

        let found = find_manifest(&nested, root.path(), PIP_MANIFEST);
        assert_eq!(found, Some(nested.join(PIP_MANIFEST)));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("api/v1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(PIP_MANIFEST), "root\n").unwrap();
        fs::write(root.path().join("api").join(PIP_MANIFEST), "near\n").unwrap();

        let found = find_manifest(&nested, root.path(), PIP_MANIFEST);
        assert_eq!(found, Some(root.path().join("api").join(PIP_MANIFEST)));
    }

    #[test]
    fn test_stop_dir_is_inclusive() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("api");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join("requirements.apt"), "libpq-dev\n").unwrap();

        let slot = SystemManifestSlot::Main;
        let found = find_manifest(&nested, root.path(), slot.file_name());
        assert_eq!(found, Some(root.path().join("requirements.apt")));
    }

    #[test]
    fn test_absent_is_none() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("api");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_manifest(&nested, root.path(), PIP_MANIFEST), None);
    }

    #[test]
    fn test_search_does_not_climb_past_stop_dir() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("src");
        let nested = root.join("api");
        fs::create_dir_all(&nested).unwrap();
        fs::write(outer.path().join(PIP_MANIFEST), "outside\n").unwrap();

        assert_eq!(find_manifest(&nested, &root, PIP_MANIFEST), None);
    }

    #[test]
    fn test_slot_file_names() {
        assert_eq!(SystemManifestSlot::Pre.file_name(), "pre-requirements.apt");
        assert_eq!(SystemManifestSlot::Main.file_name(), "requirements.apt");
        assert_eq!(SystemManifestSlot::Post.file_name(), "post-requirements.apt");
    }
}
