//! System package installs.
//!
//! Each lifecycle slot is independently optional: discovery walks from the
//! entrypoint's directory toward the source root, and absence means zero
//! invocations for that slot. A discovered manifest triggers exactly one
//! non-interactive `apt-get install`.

use std::fs;
use std::path::{Path, PathBuf};

use pybale_core::manifest::{find_manifest, SystemManifestSlot};
use pybale_core::BuildError;

use crate::env::BuildEnv;
use crate::process::{output_tail, Invocation, ToolRunner};

pub const APT_GET: &str = "apt-get";

/// Package names from a manifest: one per line, blank lines and `#` comments
/// skipped.
pub fn parse_packages(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Apply the system manifest for `slot`, if one is discovered. Returns the
/// manifest path when an install ran; `Ok(None)` when the slot was skipped
/// (no manifest, or a manifest listing no packages).
pub fn install_slot(
    runner: &dyn ToolRunner,
    env: &BuildEnv,
    slot: SystemManifestSlot,
    entry_dir: &Path,
    source_root: &Path,
) -> Result<Option<PathBuf>, BuildError> {
    let Some(manifest) = find_manifest(entry_dir, source_root, slot.file_name()) else {
        tracing::debug!(%slot, "no system manifest, skipping");
        return Ok(None);
    };

    let contents = fs::read_to_string(&manifest).map_err(|e| BuildError::DependencyInstall {
        manifest: manifest.clone(),
        status: None,
        stderr: format!("failed to read manifest: {e}"),
    })?;
    let packages = parse_packages(&contents);
    if packages.is_empty() {
        tracing::debug!(%slot, manifest = %manifest.display(), "manifest lists no packages, skipping");
        return Ok(None);
    }

    tracing::info!(%slot, manifest = %manifest.display(), packages = packages.len(), "installing system packages");

    let invocation = Invocation::new(APT_GET)
        .args(["install", "-y", "--no-install-recommends"])
        .args(packages)
        .env("DEBIAN_FRONTEND", "noninteractive")
        .envs(env.vars());

    let output = runner.run(&invocation).map_err(|e| BuildError::DependencyInstall {
        manifest: manifest.clone(),
        status: None,
        stderr: e.to_string(),
    })?;
    if !output.success() {
        return Err(BuildError::DependencyInstall {
            manifest,
            status: output.status_code,
            stderr: output_tail(&output.stderr),
        });
    }

    Ok(Some(manifest))
}
