//! The build pipeline.
//!
//! Strictly sequential, fail-fast: each stage must complete before the next
//! begins, a failing stage aborts the whole build, and nothing is retried or
//! rolled back. Workspaces are left on disk so a failed build can be
//! inspected. Checkpoints are emitted per stage via `tracing`; they never
//! affect control flow.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use pybale_core::manifest::{find_manifest, SystemManifestSlot, PIP_MANIFEST};
use pybale_core::{
    ArtifactAssembler, BuildError, BuildOutput, BuildRequest, PackageSpec, SourceMaterializer,
    TreeEnumerator,
};

use crate::apt;
use crate::env::{BuildEnv, PRODUCTION_ENV};
use crate::pip::{self, BootstrapSource};
use crate::process::{SystemRunner, ToolRunner};
use crate::runtime;
use crate::shim;
use crate::workspace::Workspace;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveRuntime,
    ProvisionWorkspaces,
    MaterializeSource,
    BootstrapInstaller,
    PreSystemInstall,
    InstallShim,
    MainSystemInstall,
    InstallRequirements,
    PostSystemInstall,
    AssembleArtifact,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ResolveRuntime => "resolve-runtime",
            Stage::ProvisionWorkspaces => "provision-workspaces",
            Stage::MaterializeSource => "materialize-source",
            Stage::BootstrapInstaller => "bootstrap-installer",
            Stage::PreSystemInstall => "pre-system-install",
            Stage::InstallShim => "install-shim",
            Stage::MainSystemInstall => "main-system-install",
            Stage::InstallRequirements => "install-requirements",
            Stage::PostSystemInstall => "post-system-install",
            Stage::AssembleArtifact => "assemble-artifact",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed build: the stage it died in plus the originating error.
#[derive(Debug, thiserror::Error)]
#[error("build failed at stage '{stage}': {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: BuildError,
}

/// Sequences one build from request to artifact. Collaborators are injected
/// as trait objects; subprocesses go through the `ToolRunner` seam.
pub struct Pipeline {
    runner: Box<dyn ToolRunner>,
    materializer: Box<dyn SourceMaterializer>,
    enumerator: Box<dyn TreeEnumerator>,
    assembler: Box<dyn ArtifactAssembler>,
    bootstrap: BootstrapSource,
    workspace_base: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(
        materializer: Box<dyn SourceMaterializer>,
        enumerator: Box<dyn TreeEnumerator>,
        assembler: Box<dyn ArtifactAssembler>,
    ) -> Self {
        Self {
            runner: Box::new(SystemRunner),
            materializer,
            enumerator,
            assembler,
            bootstrap: BootstrapSource::default(),
            workspace_base: None,
        }
    }

    pub fn with_runner(mut self, runner: Box<dyn ToolRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_bootstrap_source(mut self, source: BootstrapSource) -> Self {
        self.bootstrap = source;
        self
    }

    /// Provision workspaces under `base` instead of the system temp dir.
    pub fn with_workspace_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.workspace_base = Some(base.into());
        self
    }

    /// Run every stage for one request. Exactly one artifact on success.
    pub fn run(&self, request: &BuildRequest) -> Result<BuildOutput, PipelineError> {
        let at = |stage: Stage| move |source: BuildError| PipelineError { stage, source };

        tracing::info!(files = request.files.len(), entrypoint = %request.entrypoint, "starting build");
        log_build_image();

        checkpoint(Stage::ResolveRuntime);
        let interpreter =
            runtime::resolve(request.config.runtime()).map_err(at(Stage::ResolveRuntime))?;
        tracing::info!(runtime = %interpreter.runtime, interpreter = %interpreter.executable.display(), "resolved runtime");

        let wsgi_application = request
            .entrypoint
            .wsgi_application(request.config.wsgi_application_name());
        tracing::info!(wsgi_application = %wsgi_application, "resolved WSGI application");

        checkpoint(Stage::ProvisionWorkspaces);
        let workspace = Workspace::provision(self.workspace_base.as_deref())
            .map_err(at(Stage::ProvisionWorkspaces))?;
        let env = BuildEnv::new(&workspace.package_root, request.config.production);

        checkpoint(Stage::MaterializeSource);
        let materialized = self
            .materializer
            .materialize(&request.files, &workspace.source_root)
            .map_err(|e| {
                at(Stage::MaterializeSource)(BuildError::Materialize { reason: format!("{e:#}") })
            })?;
        tracing::info!(files = materialized.len(), source_root = %workspace.source_root.display(), "source materialized");

        checkpoint(Stage::BootstrapInstaller);
        let pip_path = pip::bootstrap(self.runner.as_ref(), &env, &interpreter, &self.bootstrap)
            .map_err(at(Stage::BootstrapInstaller))?;

        let entry_dir = workspace.source_root.join(request.entrypoint.module_dir());

        checkpoint(Stage::PreSystemInstall);
        apt::install_slot(
            self.runner.as_ref(),
            &env,
            SystemManifestSlot::Pre,
            &entry_dir,
            &workspace.source_root,
        )
        .map_err(at(Stage::PreSystemInstall))?;

        checkpoint(Stage::InstallShim);
        let staged_shim = shim::stage(&workspace.package_root)
            .map_err(|e| at(Stage::InstallShim)(BuildError::Provisioning(e)))?;
        pip::install_shim(
            self.runner.as_ref(),
            &env,
            &pip_path,
            &workspace.source_root,
            &staged_shim,
        )
        .map_err(at(Stage::InstallShim))?;

        checkpoint(Stage::MainSystemInstall);
        apt::install_slot(
            self.runner.as_ref(),
            &env,
            SystemManifestSlot::Main,
            &entry_dir,
            &workspace.source_root,
        )
        .map_err(at(Stage::MainSystemInstall))?;

        checkpoint(Stage::InstallRequirements);
        match find_manifest(&entry_dir, &workspace.source_root, PIP_MANIFEST) {
            Some(manifest) => pip::install_manifest(
                self.runner.as_ref(),
                &env,
                &pip_path,
                &workspace.source_root,
                &manifest,
            )
            .map_err(at(Stage::InstallRequirements))?,
            None => tracing::debug!("no requirements manifest, skipping project install"),
        }

        checkpoint(Stage::PostSystemInstall);
        apt::install_slot(
            self.runner.as_ref(),
            &env,
            SystemManifestSlot::Post,
            &entry_dir,
            &workspace.source_root,
        )
        .map_err(at(Stage::PostSystemInstall))?;

        checkpoint(Stage::AssembleArtifact);
        let bundle_files = self
            .enumerator
            .enumerate("**", &workspace.source_root)
            .map_err(|e| {
                at(Stage::AssembleArtifact)(BuildError::ArtifactAssembly {
                    reason: format!("{e:#}"),
                })
            })?;

        let mut environment = BTreeMap::new();
        environment.insert(shim::WSGI_APPLICATION_ENV.to_string(), wsgi_application);
        environment.insert(PRODUCTION_ENV.to_string(), env.production_value().to_string());

        let spec = PackageSpec {
            files: bundle_files,
            handler: shim::HANDLER.to_string(),
            runtime: interpreter.runtime.clone(),
            environment,
        };
        let descriptor = self.assembler.package(&spec).map_err(|e| {
            at(Stage::AssembleArtifact)(BuildError::ArtifactAssembly { reason: format!("{e:#}") })
        })?;

        tracing::info!(bundle = %descriptor.bundle.display(), size_bytes = descriptor.size_bytes, "build complete");
        Ok(BuildOutput::single(request.entrypoint.as_str(), descriptor))
    }
}

fn checkpoint(stage: Stage) {
    tracing::info!(stage = %stage, "checkpoint");
}

/// Informational only; the release file is absent off the build image.
fn log_build_image() {
    if let Ok(release) = fs::read_to_string("/etc/system-release") {
        tracing::info!(image = %release.trim(), "build image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_are_kebab_case() {
        assert_eq!(Stage::ResolveRuntime.name(), "resolve-runtime");
        assert_eq!(Stage::InstallRequirements.to_string(), "install-requirements");
    }

    #[test]
    fn test_pipeline_error_display_carries_stage() {
        let err = PipelineError {
            stage: Stage::BootstrapInstaller,
            source: BuildError::InstallerBootstrap { reason: "offline".into() },
        };
        let msg = err.to_string();
        assert!(msg.contains("bootstrap-installer"));
        assert!(msg.contains("offline"));
    }
}
