//! Workspace provisioning.

use std::path::{Path, PathBuf};

use pybale_core::BuildError;

/// The two writable directories backing one build. Directories outlive this
/// handle; the pipeline never deletes them, so a failed build can be
/// inspected in place.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// pip user base: pip itself and the staged handler package land here.
    pub package_root: PathBuf,
    /// The materialized source tree; installs target it; it becomes the bundle.
    pub source_root: PathBuf,
}

impl Workspace {
    /// Allocate two fresh empty directories, under `base` if given, else the
    /// system temp dir. Every call returns new paths.
    pub fn provision(base: Option<&Path>) -> Result<Self, BuildError> {
        Ok(Self {
            package_root: fresh_dir("pybale-pkg-", base)?,
            source_root: fresh_dir("pybale-src-", base)?,
        })
    }
}

fn fresh_dir(prefix: &str, base: Option<&Path>) -> Result<PathBuf, BuildError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);
    let dir = match base {
        Some(base) => builder.tempdir_in(base),
        None => builder.tempdir(),
    }
    .map_err(BuildError::Provisioning)?;
    #[allow(deprecated)]
    Ok(dir.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_fresh_and_distinct() {
        let base = tempfile::tempdir().unwrap();
        let a = Workspace::provision(Some(base.path())).unwrap();
        let b = Workspace::provision(Some(base.path())).unwrap();

        let all = [&a.package_root, &a.source_root, &b.package_root, &b.source_root];
        for (i, dir) in all.iter().enumerate() {
            assert!(dir.is_dir());
            assert_eq!(std::fs::read_dir(dir).unwrap().count(), 0, "{} not empty", dir.display());
            for other in &all[i + 1..] {
                assert_ne!(dir, other);
            }
        }
    }

    #[test]
    fn test_unwritable_base_is_provisioning_error() {
        let err = Workspace::provision(Some(Path::new("/nonexistent/pybale-base"))).unwrap_err();
        assert!(matches!(err, BuildError::Provisioning(_)));
    }
}
