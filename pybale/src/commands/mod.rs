pub mod build;
pub mod runtimes;
