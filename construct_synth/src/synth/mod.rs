//! Synthesis: walking a construct tree and emitting per-stack documents.
//!
//! [`Synthesizer::synthesize`] traverses the tree once, depth-first in attach
//! order. Every provider, resource, data source and backend is resolved to a
//! fragment through the [`crate::ContributorRegistry`] and merged into the
//! document of the stack that owns it. Backends are lifted to
//! `terraform.backend`; everything else lands under `provider`, `data` or
//! `resource`, keyed by type name and construct id.

mod document;
mod manifest;
mod merge;
mod synthesizer;

pub use document::{ConfigDocument, METADATA_KEY};
pub use manifest::{MANIFEST_FILE_NAME, Manifest, STACK_FILE_NAME, STACKS_DIR, StackManifest};
pub use synthesizer::{SynthOptions, Synthesis, Synthesizer, synthesize, validate};
