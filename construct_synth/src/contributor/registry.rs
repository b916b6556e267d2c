//! The `(kind, type name)` capability table.

use std::collections::HashMap;

use super::fragment::{AttributeError, Category, ConfigFragment, FragmentSource};
use super::stock;
use crate::tree::{ConstructKind, ConstructTree, NodeHandle};
use crate::{SynthError, SynthResult};

/// Signature of a fragment contributor.
///
/// Contributors must be pure functions of the [`FragmentSource`] they are
/// given.
pub type ContributeFn = fn(&FragmentSource<'_>) -> Result<ConfigFragment, AttributeError>;

/// Explicit table mapping construct kinds and type names to contributors.
///
/// Lookups try the exact `(kind, type name)` entry first and fall back to the
/// kind-wide entry registered with [`ContributorRegistry::register_fallback`].
///
/// ```
/// use construct_synth::{ConstructKind, ContributorRegistry};
/// let registry = ContributorRegistry::with_stock_contributors();
/// assert!(registry.resolve(ConstructKind::Backend, "http").is_some());
/// assert!(registry.resolve(ConstructKind::Resource, "aws_vpc").is_some());
/// assert!(registry.resolve(ConstructKind::Backend, "consul").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContributorRegistry {
    by_type: HashMap<(ConstructKind, String), ContributeFn>,
    fallback: HashMap<ConstructKind, ContributeFn>,
}

impl ContributorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the stock contributors: pass-through providers,
    /// resources and data sources, plus the `http`, `local` and `s3`
    /// backends.
    #[must_use]
    pub fn with_stock_contributors() -> Self {
        let mut registry = Self::new();
        registry.register_fallback(ConstructKind::Provider, stock::pass_through_provider);
        registry.register_fallback(ConstructKind::Resource, stock::pass_through_resource);
        registry.register_fallback(ConstructKind::DataSource, stock::pass_through_data);
        registry.register(ConstructKind::Backend, "http", stock::http_backend);
        registry.register(ConstructKind::Backend, "local", stock::local_backend);
        registry.register(ConstructKind::Backend, "s3", stock::s3_backend);
        registry
    }

    /// Register `contribute` for one `(kind, type name)` pair, replacing any
    /// earlier entry.
    pub fn register(
        &mut self,
        kind: ConstructKind,
        type_name: impl Into<String>,
        contribute: ContributeFn,
    ) -> &mut Self {
        self.by_type.insert((kind, type_name.into()), contribute);
        self
    }

    /// Register `contribute` for every type name of `kind` without an exact
    /// entry.
    pub fn register_fallback(&mut self, kind: ConstructKind, contribute: ContributeFn) -> &mut Self {
        self.fallback.insert(kind, contribute);
        self
    }

    /// Finds the contributor for `(kind, type_name)`.
    #[must_use]
    pub fn resolve(&self, kind: ConstructKind, type_name: &str) -> Option<ContributeFn> {
        self.by_type
            .get(&(kind, type_name.to_owned()))
            .or_else(|| self.fallback.get(&kind))
            .copied()
    }

    /// Computes the fragment of `handle`, or `None` for structural kinds.
    ///
    /// # Errors
    ///
    /// - [`SynthError::UnknownNode`] for foreign handles;
    /// - [`SynthError::UnknownConstructType`] when no contributor matches;
    /// - [`SynthError::InvalidAttribute`] when the contributor rejects the
    ///   construct's attributes, or returns a fragment whose category, type or
    ///   id does not match the construct.
    pub fn contribute(
        &self,
        tree: &ConstructTree,
        handle: NodeHandle,
    ) -> SynthResult<Option<ConfigFragment>> {
        let node = tree.node(handle)?;
        let Some(category) = category_of(node.kind()) else {
            return Ok(None);
        };
        let type_name = node.type_name().unwrap_or_default();
        let contribute = self.resolve(node.kind(), type_name).ok_or_else(|| {
            SynthError::UnknownConstructType {
                path: node.path().clone(),
                kind: node.kind(),
                type_name: type_name.to_owned(),
            }
        })?;
        let source = FragmentSource {
            id: node.id(),
            type_name,
            attributes: node.attributes(),
        };
        let invalid = |attribute: &str, reason: String| SynthError::InvalidAttribute {
            path: node.path().clone(),
            attribute: attribute.to_owned(),
            reason,
        };
        let fragment = contribute(&source).map_err(|err| invalid(&err.attribute, err.reason))?;

        if fragment.category() != category {
            return Err(invalid(
                "category",
                format!(
                    "a {} must contribute to '{category}', not '{}'",
                    node.kind(),
                    fragment.category()
                ),
            ));
        }
        if fragment.type_name() != type_name {
            return Err(invalid(
                "type",
                format!(
                    "fragment type '{}' does not match '{type_name}'",
                    fragment.type_name()
                ),
            ));
        }
        if fragment.id() != node.id() {
            return Err(invalid(
                "id",
                format!("fragment id '{}' does not match '{}'", fragment.id(), node.id()),
            ));
        }
        Ok(Some(fragment))
    }
}

/// Category every fragment of `kind` lands in; `None` for structural kinds.
const fn category_of(kind: ConstructKind) -> Option<Category> {
    match kind {
        ConstructKind::Provider => Some(Category::Provider),
        ConstructKind::Resource => Some(Category::Resource),
        ConstructKind::DataSource => Some(Category::Data),
        ConstructKind::Backend => Some(Category::TerraformBackend),
        ConstructKind::App | ConstructKind::Stack | ConstructKind::Element => None,
    }
}
