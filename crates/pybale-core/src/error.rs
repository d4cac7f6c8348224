//! Fatal build errors.
//!
//! Every variant aborts the build: the pipeline performs no retries and no
//! partial-success reporting. Variants carry enough context (manifest path,
//! tool exit status, tool output) to diagnose a failure without re-running.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that terminate a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The requested runtime is not in the supported set. No fallback.
    #[error("unsupported runtime '{requested}' (supported: {supported})")]
    UnsupportedRuntime { requested: String, supported: String },

    /// The runtime is supported but its interpreter is not on the build
    /// image. Interpreters are never installed on the fly.
    #[error("runtime '{runtime}' not found on this build image")]
    RuntimeNotFound { runtime: String },

    /// A workspace directory could not be created or populated.
    #[error("failed to provision build workspace")]
    Provisioning(#[source] io::Error),

    /// pip itself could not be installed; nothing can proceed without it.
    #[error("failed to bootstrap pip: {reason}")]
    InstallerBootstrap { reason: String },

    /// A system- or language-package install invocation failed.
    #[error("dependency install failed for '{}' ({}): {stderr}", manifest.display(), fmt_status(*status))]
    DependencyInstall {
        manifest: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    /// Final packaging failed (size cap exceeded, unwritable output, ...).
    #[error("artifact assembly failed: {reason}")]
    ArtifactAssembly { reason: String },

    /// The source-transfer collaborator failed to populate the source root.
    #[error("source materialization failed: {reason}")]
    Materialize { reason: String },
}

fn fmt_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit {code}"),
        None => "no exit status".to_string(),
    }
}
