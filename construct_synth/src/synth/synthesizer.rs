//! The single-pass tree walk turning constructs into documents.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::document::ConfigDocument;
use super::merge::DocumentBuilder;
use crate::contributor::{Category, ContributorRegistry};
use crate::tree::{ConstructTree, NodeHandle};
use crate::{AppConfig, SynthError, SynthResult};

/// Switches applied while synthesizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SynthOptions {
    /// Emit `//` metadata blocks: a document header naming the stack and
    /// backend, and per-block construct paths and logical ids.
    pub emit_metadata: bool,
}

impl From<&AppConfig> for SynthOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            emit_metadata: config.emit_metadata,
        }
    }
}

/// Documents produced by one synthesis run, in stack creation order.
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    documents: Vec<(String, ConfigDocument)>,
}

impl Synthesis {
    /// Document of `stack_id`.
    #[must_use]
    pub fn get(&self, stack_id: &str) -> Option<&ConfigDocument> {
        self.documents
            .iter()
            .find_map(|(id, document)| (id == stack_id).then_some(document))
    }

    /// `(stack id, document)` pairs in stack creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigDocument)> {
        self.documents
            .iter()
            .map(|(id, document)| (id.as_str(), document))
    }

    /// Stack ids in creation order.
    pub fn stack_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(id, _)| id.as_str())
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the app declared no stacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Consumes the synthesis, returning the `(stack id, document)` pairs.
    #[must_use]
    pub fn into_documents(self) -> Vec<(String, ConfigDocument)> {
        self.documents
    }
}

/// Walks a [`ConstructTree`] and merges every contributed fragment.
#[derive(Clone, Copy, Debug)]
pub struct Synthesizer<'r> {
    registry: &'r ContributorRegistry,
    options: SynthOptions,
}

impl<'r> Synthesizer<'r> {
    /// Create a synthesizer resolving contributors through `registry`.
    #[must_use]
    pub fn new(registry: &'r ContributorRegistry) -> Self {
        Self {
            registry,
            options: SynthOptions::default(),
        }
    }

    /// Replace the synthesis options.
    #[must_use]
    pub const fn with_options(mut self, options: SynthOptions) -> Self {
        self.options = options;
        self
    }

    /// Produce one document per stack of `tree`.
    ///
    /// The walk is depth-first in attach order. Either every document is
    /// returned or the first error is.
    ///
    /// # Errors
    ///
    /// - [`SynthError::UnknownConstructType`] or
    ///   [`SynthError::InvalidAttribute`] from the contributor table;
    /// - [`SynthError::DuplicateResource`] when two constructs of one stack
    ///   emit the same block address.
    pub fn synthesize(&self, tree: &ConstructTree) -> SynthResult<Synthesis> {
        let mut builders = Vec::with_capacity(tree.stacks().len());
        let mut slots: HashMap<NodeHandle, usize> = HashMap::new();
        for (slot, &stack) in tree.stacks().iter().enumerate() {
            builders.push(DocumentBuilder::new(tree.node(stack)?.id()));
            slots.insert(stack, slot);
        }

        for handle in tree.walk() {
            let Some(fragment) = self.registry.contribute(tree, handle)? else {
                continue;
            };
            let node = tree.node(handle)?;
            let builder = tree
                .owner_stack(handle)?
                .and_then(|stack| slots.get(&stack).copied())
                .and_then(|slot| builders.get_mut(slot))
                .ok_or_else(|| {
                    SynthError::invalid_nesting(
                        node.path().clone(),
                        node.kind(),
                        "construct is not owned by a stack",
                    )
                })?;
            let wants_metadata = self.options.emit_metadata
                && matches!(fragment.category(), Category::Resource | Category::Data);
            let metadata = if wants_metadata {
                Some(json!({
                    "metadata": {
                        "path": node.path(),
                        "uniqueId": tree.logical_id(handle)?,
                    }
                }))
            } else {
                None
            };
            builder.merge(fragment, node.path(), metadata)?;
        }

        let documents = builders
            .into_iter()
            .map(|builder| {
                tracing::info!(
                    stack = %builder.stack(),
                    blocks = builder.block_count(),
                    "synthesized stack"
                );
                let header = self.options.emit_metadata.then(|| header(&builder));
                let stack = builder.stack().to_owned();
                (stack, builder.finish(header))
            })
            .collect();
        Ok(Synthesis { documents })
    }

    /// Run every contributor and report all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the single failure unchanged, or [`SynthError::Aggregate`]
    /// when several constructs are invalid.
    pub fn validate(&self, tree: &ConstructTree) -> SynthResult<()> {
        let errors = tree
            .walk()
            .filter_map(|handle| self.registry.contribute(tree, handle).err());
        SynthError::try_aggregate(errors).map_or(Ok(()), Err)
    }
}

fn header(builder: &DocumentBuilder) -> Value {
    let mut metadata = Map::new();
    metadata.insert("version".to_owned(), json!(env!("CARGO_PKG_VERSION")));
    metadata.insert("stackName".to_owned(), json!(builder.stack()));
    if let Some(backend) = builder.backend_type() {
        metadata.insert("backend".to_owned(), json!(backend));
    }
    json!({ "metadata": metadata })
}

/// Synthesize `tree` with the options derived from its [`AppConfig`].
///
/// # Errors
///
/// See [`Synthesizer::synthesize`].
pub fn synthesize(tree: &ConstructTree, registry: &ContributorRegistry) -> SynthResult<Synthesis> {
    Synthesizer::new(registry)
        .with_options(SynthOptions::from(tree.config()))
        .synthesize(tree)
}

/// Validate every contributing construct of `tree`.
///
/// # Errors
///
/// See [`Synthesizer::validate`].
pub fn validate(tree: &ConstructTree, registry: &ContributorRegistry) -> SynthResult<()> {
    Synthesizer::new(registry).validate(tree)
}
