//! Local source materializer: writes a file set into a directory.

use std::fs;
use std::path::{Component, Path};

use anyhow::{bail, Context, Result};

use pybale_core::{FileRef, FileSet, SourceMaterializer};

/// Writes every file reference to disk under the destination, preserving
/// unix modes. The destination is fully populated before this returns.
#[derive(Debug, Default)]
pub struct LocalMaterializer;

impl SourceMaterializer for LocalMaterializer {
    fn materialize(&self, files: &FileSet, destination: &Path) -> Result<FileSet> {
        let mut written = FileSet::new();
        for (rel, file) in files {
            if !is_safe_relative(rel) {
                bail!("refusing to materialize {rel:?}: path escapes the destination");
            }
            let target = destination.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }

            let data = file.read().with_context(|| format!("read source of {rel}"))?;
            fs::write(&target, &data).with_context(|| format!("write {}", target.display()))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(file.mode()))
                    .with_context(|| format!("set mode on {}", target.display()))?;
            }

            written.insert(rel.clone(), FileRef::on_disk(target, file.mode()));
        }
        tracing::debug!(files = written.len(), destination = %destination.display(), "materialized source");
        Ok(written)
    }
}

fn is_safe_relative(rel: &str) -> bool {
    let path = Path::new(rel);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
