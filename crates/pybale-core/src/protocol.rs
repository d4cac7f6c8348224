//! Input and output records exchanged with the build orchestrator.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::entrypoint::Entrypoint;
use crate::fileset::FileSet;

/// Immutable input to one pipeline run.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub files: FileSet,
    pub entrypoint: Entrypoint,
    pub config: BuildConfig,
}

impl BuildRequest {
    pub fn new(files: FileSet, entrypoint: Entrypoint, config: BuildConfig) -> Self {
        Self {
            files,
            entrypoint,
            config,
        }
    }
}

/// Everything the artifact assembler needs to produce one bundle.
#[derive(Debug, Clone)]
pub struct PackageSpec {
    pub files: FileSet,
    pub handler: String,
    pub runtime: String,
    pub environment: BTreeMap<String, String>,
}

/// One packaged bundle, annotated with how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub bundle: PathBuf,
    pub sha256: String,
    pub size_bytes: u64,
    pub handler: String,
    pub runtime: String,
    pub environment: BTreeMap<String, String>,
}

/// Pipeline output: entrypoint identifier to descriptor. Exactly one entry
/// per build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOutput {
    pub artifacts: BTreeMap<String, ArtifactDescriptor>,
}

impl BuildOutput {
    pub fn single(entrypoint: &str, descriptor: ArtifactDescriptor) -> Self {
        let mut artifacts = BTreeMap::new();
        artifacts.insert(entrypoint.to_string(), descriptor);
        Self { artifacts }
    }

    pub fn get(&self, entrypoint: &str) -> Option<&ArtifactDescriptor> {
        self.artifacts.get(entrypoint)
    }
}
