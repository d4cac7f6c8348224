//! Build pipeline for Python WSGI serverless bundles: resolve a runtime,
//! provision workspaces, install system and language dependencies, and hand
//! the finished tree to an artifact assembler.

pub mod apt;
pub mod env;
pub mod pip;
pub mod pipeline;
pub mod process;
pub mod runtime;
pub mod shim;
pub mod workspace;

pub use env::BuildEnv;
pub use pip::BootstrapSource;
pub use pipeline::{Pipeline, PipelineError, Stage};
pub use process::{Invocation, SystemRunner, ToolOutput, ToolRunner};
pub use runtime::{InstalledInterpreter, SUPPORTED_RUNTIMES};
pub use workspace::Workspace;
