//! The build command: assemble a BuildRequest from the CLI arguments and run
//! the pipeline with the local collaborators.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pybale_artifact::{LocalMaterializer, WalkdirEnumerator, ZipAssembler};
use pybale_builder::Pipeline;
use pybale_core::{BuildConfig, BuildRequest, Entrypoint, TreeEnumerator};

pub struct BuildArgs {
    pub project_dir: PathBuf,
    pub entrypoint: String,
    pub runtime: Option<String>,
    pub wsgi_name: Option<String>,
    pub production: bool,
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub workspace_dir: Option<PathBuf>,
}

pub fn cmd_build(args: BuildArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args)?;
    let entrypoint = Entrypoint::parse(&args.entrypoint).context("invalid --entrypoint")?;

    let project_dir = &args.project_dir;
    anyhow::ensure!(
        project_dir.is_dir(),
        "project directory {} does not exist",
        project_dir.display()
    );
    let files = WalkdirEnumerator
        .enumerate("**", project_dir)
        .with_context(|| format!("enumerate {}", project_dir.display()))?;
    anyhow::ensure!(
        !files.is_empty(),
        "project directory {} contains no files",
        project_dir.display()
    );

    let request = BuildRequest::new(files, entrypoint, config);
    tracing::info!(
        project_dir = %project_dir.display(),
        entrypoint = %request.entrypoint,
        runtime = request.config.runtime(),
        "building"
    );

    let mut pipeline = Pipeline::new(
        Box::new(LocalMaterializer),
        Box::new(WalkdirEnumerator),
        Box::new(ZipAssembler::new(&args.output_dir)),
    );
    if let Some(base) = &args.workspace_dir {
        fs::create_dir_all(base).with_context(|| format!("create {}", base.display()))?;
        pipeline = pipeline.with_workspace_base(base);
    }

    let output = pipeline.run(&request)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Start from the config file when given, then let CLI flags override.
fn load_config(path: Option<&Path>, args: &BuildArgs) -> Result<BuildConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            BuildConfig::from_json(&raw)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => BuildConfig::default(),
    };

    if args.runtime.is_some() {
        config.runtime = args.runtime.clone();
    }
    if args.wsgi_name.is_some() {
        config.wsgi_application_name = args.wsgi_name.clone();
    }
    if args.production {
        config.production = true;
    }
    Ok(config)
}
