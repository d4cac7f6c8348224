//! Runtime resolution: allow-list validation, then interpreter lookup.

use std::path::PathBuf;

use pybale_core::BuildError;

/// Runtimes this builder can target. The interpreter binary must carry the
/// same name on `PATH`.
pub const SUPPORTED_RUNTIMES: [&str; 4] = ["python3.6", "python3.7", "python3.8", "python3.9"];

/// A validated runtime together with its interpreter on this image.
#[derive(Debug, Clone)]
pub struct InstalledInterpreter {
    pub runtime: String,
    pub executable: PathBuf,
}

/// Check `requested` against the allow-list. No fallback, no side effects.
pub fn validate_runtime(requested: &str) -> Result<(), BuildError> {
    if SUPPORTED_RUNTIMES.contains(&requested) {
        return Ok(());
    }
    Err(BuildError::UnsupportedRuntime {
        requested: requested.to_string(),
        supported: SUPPORTED_RUNTIMES.join(", "),
    })
}

/// Locate the interpreter for an allowed runtime on `PATH`. Interpreters are
/// never installed on the fly; absence is fatal.
pub fn locate_interpreter(runtime: &str) -> Result<InstalledInterpreter, BuildError> {
    let executable = which::which(runtime).map_err(|_| BuildError::RuntimeNotFound {
        runtime: runtime.to_string(),
    })?;
    tracing::debug!(runtime, interpreter = %executable.display(), "located interpreter");
    Ok(InstalledInterpreter {
        runtime: runtime.to_string(),
        executable,
    })
}

/// Validate then locate.
pub fn resolve(requested: &str) -> Result<InstalledInterpreter, BuildError> {
    validate_runtime(requested)?;
    locate_interpreter(requested)
}
