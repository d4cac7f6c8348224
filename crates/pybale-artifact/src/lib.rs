//! Local implementations of the pipeline's collaborator boundaries: write a
//! file set to disk, capture a tree back, and zip it into a bundle.

pub mod assemble;
pub mod enumerate;
pub mod materialize;

pub use assemble::{ZipAssembler, BUNDLE_FILE_NAME, DEFAULT_MAX_BUNDLE_BYTES};
pub use enumerate::WalkdirEnumerator;
pub use materialize::LocalMaterializer;
