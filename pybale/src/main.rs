mod cli;
mod commands;
mod observability;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            project_dir,
            entrypoint,
            runtime,
            wsgi_name,
            production,
            config,
            output_dir,
            workspace_dir,
        } => {
            commands::build::cmd_build(commands::build::BuildArgs {
                project_dir,
                entrypoint,
                runtime,
                wsgi_name,
                production,
                config,
                output_dir,
                workspace_dir,
            })?;
        }
        Commands::Runtimes => {
            commands::runtimes::cmd_runtimes()?;
        }
    }

    Ok(())
}
