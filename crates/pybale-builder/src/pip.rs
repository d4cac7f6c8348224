//! Language package installs.
//!
//! pip is bootstrapped once per build into the workspace's user-package root
//! and reused for every install that follows. Installs always target the
//! source root, so installed packages travel with the bundle.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use pybale_core::BuildError;

use crate::env::BuildEnv;
use crate::process::{output_tail, Invocation, ToolRunner};
use crate::runtime::InstalledInterpreter;

pub const GET_PIP_URL: &str = "https://bootstrap.pypa.io/get-pip.py";

/// Where the pip bootstrap script comes from. Tests and air-gapped images
/// point this at a local file.
#[derive(Debug, Clone)]
pub enum BootstrapSource {
    Remote(String),
    Script(PathBuf),
}

impl Default for BootstrapSource {
    fn default() -> Self {
        BootstrapSource::Remote(GET_PIP_URL.to_string())
    }
}

/// Where the bootstrap drops the pip executable.
pub fn pip_executable(user_base: &Path) -> PathBuf {
    if cfg!(windows) {
        user_base.join("Scripts").join("pip.exe")
    } else {
        user_base.join("bin").join("pip")
    }
}

fn fetch_bootstrap_script(
    source: &BootstrapSource,
    dest_dir: &Path,
) -> Result<PathBuf, BuildError> {
    let bootstrap_err = |reason: String| BuildError::InstallerBootstrap { reason };

    match source {
        BootstrapSource::Script(path) => Ok(path.clone()),
        BootstrapSource::Remote(url) => {
            tracing::debug!(url, "downloading pip bootstrap script");
            let agent = ureq::AgentBuilder::new().build();
            let resp = agent
                .get(url)
                .call()
                .map_err(|e| bootstrap_err(format!("download {url}: {e}")))?;
            let status = resp.status();
            if status != 200 {
                return Err(bootstrap_err(format!("download {url}: HTTP {status}")));
            }

            let mut bytes = Vec::new();
            resp.into_reader()
                .read_to_end(&mut bytes)
                .map_err(|e| bootstrap_err(format!("read {url}: {e}")))?;

            let script = dest_dir.join("get-pip.py");
            fs::write(&script, bytes)
                .map_err(|e| bootstrap_err(format!("write {}: {e}", script.display())))?;
            Ok(script)
        }
    }
}

/// Install pip itself into the build's user-package root. Runs
/// `<interpreter> get-pip.py --user` with the build environment applied, so
/// pip lands under `PYTHONUSERBASE` and never touches the system site.
pub fn bootstrap(
    runner: &dyn ToolRunner,
    env: &BuildEnv,
    interpreter: &InstalledInterpreter,
    source: &BootstrapSource,
) -> Result<PathBuf, BuildError> {
    let script = fetch_bootstrap_script(source, env.user_base())?;

    let invocation = Invocation::new(&interpreter.executable)
        .arg_path(&script)
        .arg("--user")
        .envs(env.vars())
        .cwd(env.user_base());

    let output = runner
        .run(&invocation)
        .map_err(|e| BuildError::InstallerBootstrap { reason: e.to_string() })?;
    if !output.success() {
        return Err(BuildError::InstallerBootstrap {
            reason: output_tail(&output.stderr),
        });
    }

    let pip = pip_executable(env.user_base());
    tracing::info!(pip = %pip.display(), "pip bootstrapped");
    Ok(pip)
}

/// Install the staged handler shim package into the source root.
pub fn install_shim(
    runner: &dyn ToolRunner,
    env: &BuildEnv,
    pip: &Path,
    source_root: &Path,
    shim_dir: &Path,
) -> Result<(), BuildError> {
    tracing::info!(shim = %shim_dir.display(), "installing handler shim");
    let shim_arg = shim_dir.to_string_lossy().into_owned();
    run_install(runner, env, pip, source_root, [shim_arg], shim_dir)
}

/// Install a discovered project manifest into the source root. Callers check
/// for the manifest before invoking; this never probes the filesystem.
pub fn install_manifest(
    runner: &dyn ToolRunner,
    env: &BuildEnv,
    pip: &Path,
    source_root: &Path,
    manifest: &Path,
) -> Result<(), BuildError> {
    tracing::info!(manifest = %manifest.display(), "installing project requirements");
    let args = ["-r".to_string(), manifest.to_string_lossy().into_owned()];
    run_install(runner, env, pip, source_root, args, manifest)
}

fn run_install(
    runner: &dyn ToolRunner,
    env: &BuildEnv,
    pip: &Path,
    source_root: &Path,
    extra: impl IntoIterator<Item = String>,
    label: &Path,
) -> Result<(), BuildError> {
    let invocation = Invocation::new(pip)
        .arg("install")
        .arg("--target")
        .arg_path(source_root)
        .args(extra)
        .envs(env.vars())
        .cwd(source_root);

    let output = runner.run(&invocation).map_err(|e| BuildError::DependencyInstall {
        manifest: label.to_path_buf(),
        status: None,
        stderr: e.to_string(),
    })?;
    if !output.success() {
        return Err(BuildError::DependencyInstall {
            manifest: label.to_path_buf(),
            status: output.status_code,
            stderr: output_tail(&output.stderr),
        });
    }
    Ok(())
}
