//! Collaborator boundaries.
//!
//! The pipeline depends on these traits, not on any particular transfer or
//! packaging backend. Local implementations live in `pybale-artifact`;
//! tests substitute recording fakes.

use std::path::Path;

use anyhow::Result;

use crate::fileset::FileSet;
use crate::protocol::{ArtifactDescriptor, PackageSpec};

/// Transfers a file set into a provisioned directory.
pub trait SourceMaterializer: Send + Sync {
    /// Fully populate `destination` with the contents of `files` before
    /// returning. The returned set references the written on-disk files.
    fn materialize(&self, files: &FileSet, destination: &Path) -> Result<FileSet>;
}

/// Captures a directory tree as a file set.
pub trait TreeEnumerator: Send + Sync {
    /// Enumerate files under `root` matching `pattern`, keyed by
    /// root-relative path.
    fn enumerate(&self, pattern: &str, root: &Path) -> Result<FileSet>;
}

/// Packages a file set into an invocable artifact.
pub trait ArtifactAssembler: Send + Sync {
    fn package(&self, spec: &PackageSpec) -> Result<ArtifactDescriptor>;
}
