use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pybale - build deployable serverless bundles from Python WSGI applications
#[derive(Parser, Debug)]
#[command(name = "pybale")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one entrypoint of a project into an invocable bundle
    Build {
        /// Project directory holding the application source
        #[arg(value_name = "PROJECT_DIR")]
        project_dir: PathBuf,

        /// Entrypoint identifier: module path with an optional handler
        /// attribute, e.g. api/index.handler
        #[arg(long, short = 'e', value_name = "MODULE[.ATTR]")]
        entrypoint: String,

        /// Target runtime (overrides the config file)
        #[arg(long, value_name = "RUNTIME")]
        runtime: Option<String>,

        /// Attribute name of the WSGI application object (overrides the
        /// config file)
        #[arg(long, value_name = "NAME")]
        wsgi_name: Option<String>,

        /// Production mode: the bundled handler hides tracebacks
        #[arg(long, default_value = "false")]
        production: bool,

        /// Build configuration file (JSON map; unrecognized keys ignored)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Where the bundle is written
        #[arg(long, value_name = "DIR", default_value = "dist")]
        output_dir: PathBuf,

        /// Provision build workspaces under this directory instead of the
        /// system temp dir
        #[arg(long, value_name = "DIR")]
        workspace_dir: Option<PathBuf>,
    },

    /// List the supported runtimes
    Runtimes,
}
