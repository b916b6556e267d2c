//! Persisting synthesized documents.
//!
//! Synthesis itself never touches the filesystem. [`synth_app`] produces
//! every document first and only then hands them to an [`OutputWriter`], so
//! a failing tree leaves no partial output behind.

mod directory;

pub use directory::DirectoryWriter;

use camino::Utf8PathBuf;

use crate::contributor::ContributorRegistry;
use crate::synth::{ConfigDocument, Manifest, synthesize};
use crate::tree::ConstructTree;
use crate::SynthResult;

/// Destination for synthesized artefacts.
pub trait OutputWriter {
    /// Persist the document of `stack_id`, returning where it was written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Io`] or [`crate::SynthError::Json`] when
    /// the document cannot be rendered or stored.
    fn write_stack(&mut self, stack_id: &str, document: &ConfigDocument)
    -> SynthResult<Utf8PathBuf>;

    /// Persist the manifest of a synthesis run.
    ///
    /// # Errors
    ///
    /// As for [`OutputWriter::write_stack`].
    fn write_manifest(&mut self, manifest: &Manifest) -> SynthResult<Utf8PathBuf>;
}

/// Synthesize `tree` and write every stack document plus the manifest.
///
/// # Errors
///
/// Returns the synthesis error before anything is written, or the first
/// writer failure.
pub fn synth_app<W>(
    tree: &ConstructTree,
    registry: &ContributorRegistry,
    writer: &mut W,
) -> SynthResult<Manifest>
where
    W: OutputWriter + ?Sized,
{
    let synthesis = synthesize(tree, registry)?;
    let manifest = Manifest::for_synthesis(&synthesis);
    for (stack_id, document) in synthesis.iter() {
        writer.write_stack(stack_id, document)?;
    }
    writer.write_manifest(&manifest)?;
    Ok(manifest)
}
