//! Bundle assembly: zip the final tree, digest it, enforce the size cap.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use zip::write::FileOptions;

use pybale_core::{ArtifactAssembler, ArtifactDescriptor, PackageSpec};

/// Serverless platforms commonly reject bundles above this size.
pub const DEFAULT_MAX_BUNDLE_BYTES: u64 = 15 * 1024 * 1024;

pub const BUNDLE_FILE_NAME: &str = "bundle.zip";

/// Zips a file set into `<output_dir>/bundle.zip` and annotates the result
/// with the handler, runtime, and environment from the package spec.
#[derive(Debug)]
pub struct ZipAssembler {
    output_dir: PathBuf,
    max_bundle_bytes: u64,
}

impl ZipAssembler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_bundle_bytes: DEFAULT_MAX_BUNDLE_BYTES,
        }
    }

    pub fn with_max_bundle_bytes(mut self, max: u64) -> Self {
        self.max_bundle_bytes = max;
        self
    }
}

impl ArtifactAssembler for ZipAssembler {
    fn package(&self, spec: &PackageSpec) -> Result<ArtifactDescriptor> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("create {}", self.output_dir.display()))?;
        let bundle = self.output_dir.join(BUNDLE_FILE_NAME);

        let file = fs::File::create(&bundle)
            .with_context(|| format!("create {}", bundle.display()))?;
        let mut writer = zip::ZipWriter::new(file);
        for (rel, fref) in &spec.files {
            let options = FileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .unix_permissions(fref.mode());
            writer
                .start_file(rel.as_str(), options)
                .with_context(|| format!("add {rel} to bundle"))?;
            let data = fref.read().with_context(|| format!("read {rel}"))?;
            writer.write_all(&data).with_context(|| format!("write {rel}"))?;
        }
        writer.finish().context("finalize bundle")?;

        let bytes = fs::read(&bundle).with_context(|| format!("read {}", bundle.display()))?;
        let size_bytes = bytes.len() as u64;
        if size_bytes > self.max_bundle_bytes {
            bail!(
                "bundle is {size_bytes} bytes, exceeding the {} byte limit",
                self.max_bundle_bytes
            );
        }

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let sha256 = hex::encode(hasher.finalize());

        tracing::info!(bundle = %bundle.display(), size_bytes, files = spec.files.len(), "bundle assembled");

        Ok(ArtifactDescriptor {
            bundle,
            sha256,
            size_bytes,
            handler: spec.handler.clone(),
            runtime: spec.runtime.clone(),
            environment: spec.environment.clone(),
        })
    }
}
