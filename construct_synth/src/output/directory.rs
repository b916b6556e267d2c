//! [`OutputWriter`] storing artefacts below a directory.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use super::OutputWriter;
use crate::synth::{ConfigDocument, MANIFEST_FILE_NAME, Manifest, StackManifest};
use crate::{AppConfig, SynthError, SynthResult, SynthResultExt};

/// Writes `stacks/<stack>/cdk.tf.json` and `manifest.json` below `outdir`.
#[derive(Clone, Debug)]
pub struct DirectoryWriter {
    outdir: Utf8PathBuf,
    pretty: bool,
}

impl DirectoryWriter {
    /// Writer targeting `outdir`.
    #[must_use]
    pub fn new(outdir: impl Into<Utf8PathBuf>, pretty: bool) -> Self {
        Self {
            outdir: outdir.into(),
            pretty,
        }
    }

    /// Writer targeting the configured output directory.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.outdir.clone(), config.pretty)
    }

    /// Root of the written artefacts.
    #[must_use]
    pub fn outdir(&self) -> &Utf8Path {
        &self.outdir
    }

    fn write_file(&self, relative: &Utf8Path, contents: &str) -> SynthResult<Utf8PathBuf> {
        let root = ensure_dir(&self.outdir)?;
        let target = self.outdir.join(relative);
        if let Some(parent) = relative.parent().filter(|p| !p.as_str().is_empty()) {
            root.create_dir_all(parent)
                .map_err(|io_err| SynthError::io(&self.outdir.join(parent), io_err))?;
        }
        if root.exists(relative) {
            tracing::warn!(path = %target, "replacing existing artefact");
        }
        let mut file = root
            .open_with(
                relative,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|io_err| SynthError::io(&target, io_err))?;
        file.write_all(contents.as_bytes())
            .map_err(|io_err| SynthError::io(&target, io_err))?;
        tracing::info!(path = %target, bytes = contents.len(), "wrote artefact");
        Ok(target)
    }
}

impl OutputWriter for DirectoryWriter {
    fn write_stack(
        &mut self,
        stack_id: &str,
        document: &ConfigDocument,
    ) -> SynthResult<Utf8PathBuf> {
        let contents = if self.pretty {
            document.to_json_pretty()?
        } else {
            document.to_json()?
        };
        let entry = StackManifest::for_stack(stack_id);
        self.write_file(&entry.synthesized_stack_path, &contents)
    }

    fn write_manifest(&mut self, manifest: &Manifest) -> SynthResult<Utf8PathBuf> {
        let contents = if self.pretty {
            serde_json::to_string_pretty(manifest).into_synth()?
        } else {
            serde_json::to_string(manifest).into_synth()?
        };
        self.write_file(Utf8Path::new(MANIFEST_FILE_NAME), &contents)
    }
}

fn ensure_dir(path: &Utf8Path) -> SynthResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| SynthError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| SynthError::io(path, io_err))
        }
        Err(open_err) => Err(SynthError::io(path, open_err)),
    }
}
