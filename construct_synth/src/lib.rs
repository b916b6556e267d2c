//! Core crate for the `construct_synth` synthesis pipeline.
//!
//! Infrastructure is declared as a tree of constructs: an [`App`] root owning
//! stacks, and stacks owning providers, resources, data sources, a backend and
//! arbitrary grouping elements. [`synthesize`] walks that tree once and emits
//! one [`ConfigDocument`] per stack, merging the fragment contributed by every
//! provider, resource, data source and backend.
//!
//! ```rust
//! use construct_synth::{AppConfig, Construct, ConstructTree, ContributorRegistry, synthesize};
//! use serde_json::json;
//!
//! let mut tree = ConstructTree::new(AppConfig::default());
//! let stack = tree.add_stack("my-stack")?;
//! tree.add_backend(stack, "http", json!({"address": "http://localhost:1234"}))?;
//! tree.attach(stack, "null", Construct::provider("null", json!({})))?;
//!
//! let registry = ContributorRegistry::with_stock_contributors();
//! let synthesis = synthesize(&tree, &registry)?;
//! let document = synthesis.get("my-stack").expect("stack was synthesized");
//! assert_eq!(
//!     document.as_value()["terraform"]["backend"]["http"]["address"],
//!     "http://localhost:1234"
//! );
//! # Ok::<_, construct_synth::SynthError>(())
//! ```
//!
//! [`App`]: ConstructKind::App

mod config;
pub mod contributor;
mod error;
pub mod output;
mod result_ext;
pub mod synth;
pub mod tree;

pub use config::{AppConfig, CONFIG_ENV_PREFIX, CONFIG_FILE_NAME};
pub use contributor::{
    AttributeError, Category, ConfigFragment, ContributeFn, ContributorRegistry, FragmentSource,
};
pub use error::{AggregatedErrors, SynthError};
pub use output::{DirectoryWriter, OutputWriter, synth_app};
pub use result_ext::SynthResultExt;
pub use synth::{
    ConfigDocument, Manifest, StackManifest, SynthOptions, Synthesis, Synthesizer, synthesize,
    validate,
};
pub use tree::{Construct, ConstructKind, ConstructPath, ConstructTree, Node, NodeHandle};

/// Result alias used throughout the crate.
pub type SynthResult<T> = Result<T, SynthError>;
