//! File sets: the unit of exchange between the orchestrator, the pipeline,
//! and the artifact collaborators.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default unix mode for files without an explicit one.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// A reference to one file's content, either carried inline or pointing at
/// a file already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    Inline { data: Vec<u8>, mode: u32 },
    OnDisk { path: PathBuf, mode: u32 },
}

impl FileRef {
    pub fn inline(data: impl Into<Vec<u8>>) -> Self {
        FileRef::Inline {
            data: data.into(),
            mode: DEFAULT_FILE_MODE,
        }
    }

    pub fn on_disk(path: impl Into<PathBuf>, mode: u32) -> Self {
        FileRef::OnDisk {
            path: path.into(),
            mode,
        }
    }

    pub fn mode(&self) -> u32 {
        match self {
            FileRef::Inline { mode, .. } | FileRef::OnDisk { mode, .. } => *mode,
        }
    }

    /// Read the referenced content.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            FileRef::Inline { data, .. } => Ok(data.clone()),
            FileRef::OnDisk { path, .. } => fs::read(path),
        }
    }
}

/// Ordered map from source-root-relative path (forward slashes) to content
/// reference. BTreeMap keeps enumeration and packaging deterministic.
pub type FileSet = BTreeMap<String, FileRef>;
