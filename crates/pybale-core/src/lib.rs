pub mod collaborators;
pub mod config;
pub mod entrypoint;
pub mod error;
pub mod fileset;
pub mod manifest;
pub mod protocol;

pub use collaborators::{ArtifactAssembler, SourceMaterializer, TreeEnumerator};
pub use config::{BuildConfig, DEFAULT_APPLICATION_NAME, DEFAULT_RUNTIME};
pub use entrypoint::{Entrypoint, InvalidEntrypoint};
pub use error::BuildError;
pub use fileset::{FileRef, FileSet};
pub use manifest::{find_manifest, SystemManifestSlot, PIP_MANIFEST};
pub use protocol::{ArtifactDescriptor, BuildOutput, BuildRequest, PackageSpec};
