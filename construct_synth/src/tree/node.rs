//! Node, path and kind types stored in the construct arena.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Separator used when rendering a [`ConstructPath`].
pub const PATH_SEPARATOR: char = '/';

/// Opaque handle of a construct inside a [`super::ConstructTree`].
///
/// Handles are plain indices into the tree's arena. A node stores its parent
/// as a handle, so ownership always flows from the root towards the leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u32);

impl NodeHandle {
    pub(crate) const ROOT: Self = Self(0);

    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeHandle {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag deciding the construction rules and emission behaviour of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstructKind {
    /// The single root of the tree.
    App,
    /// Grouping boundary producing one document.
    Stack,
    /// Provider configuration block.
    Provider,
    /// Managed resource block.
    Resource,
    /// Data source block.
    DataSource,
    /// Backend configuration; at most one per stack.
    Backend,
    /// Structural grouping without output of its own.
    Element,
}

impl ConstructKind {
    /// Returns the lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Stack => "stack",
            Self::Provider => "provider",
            Self::Resource => "resource",
            Self::DataSource => "data source",
            Self::Backend => "backend",
            Self::Element => "element",
        }
    }

    /// Whether nodes of this kind contribute a configuration fragment.
    #[must_use]
    pub const fn is_contributing(self) -> bool {
        matches!(
            self,
            Self::Provider | Self::Resource | Self::DataSource | Self::Backend
        )
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered ids from the app root down to a node.
///
/// The app root owns the empty path; a stack `s` owns `["s"]`.
///
/// ```
/// use construct_synth::ConstructPath;
/// let path = ConstructPath::root().child("my-stack").child("network");
/// assert_eq!(path.to_string(), "my-stack/network");
/// assert_eq!(path.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructPath(Vec<String>);

impl ConstructPath {
    /// The path of the app root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by `id`.
    #[must_use]
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut components = self.0.clone();
        components.push(id.into());
        Self(components)
    }

    /// The individual ids, outermost first.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the path of the app root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last component, or `None` for the app root.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether `prefix` is an ancestor of (or equal to) this path.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<app>");
        }
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl Serialize for ConstructPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.join("/"))
    }
}

/// Declaration passed to [`super::ConstructTree::attach`].
///
/// ```
/// use construct_synth::{Construct, ConstructKind};
/// use serde_json::json;
/// let resource = Construct::resource("null_resource", json!({"triggers": {}}));
/// assert_eq!(resource.kind(), ConstructKind::Resource);
/// assert_eq!(resource.type_name(), Some("null_resource"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Construct {
    kind: ConstructKind,
    type_name: Option<String>,
    attributes: Value,
}

impl Construct {
    pub(crate) fn structural(kind: ConstructKind) -> Self {
        Self {
            kind,
            type_name: None,
            attributes: Value::Object(Map::new()),
        }
    }

    fn typed(kind: ConstructKind, type_name: impl Into<String>, attributes: Value) -> Self {
        Self {
            kind,
            type_name: Some(type_name.into()),
            attributes,
        }
    }

    /// A stack; must be attached directly to the app.
    #[must_use]
    pub fn stack() -> Self {
        Self::structural(ConstructKind::Stack)
    }

    /// A grouping element without output of its own.
    #[must_use]
    pub fn element() -> Self {
        Self::structural(ConstructKind::Element)
    }

    /// A provider block of `type_name`.
    #[must_use]
    pub fn provider(type_name: impl Into<String>, attributes: Value) -> Self {
        Self::typed(ConstructKind::Provider, type_name, attributes)
    }

    /// A managed resource block of `type_name`.
    #[must_use]
    pub fn resource(type_name: impl Into<String>, attributes: Value) -> Self {
        Self::typed(ConstructKind::Resource, type_name, attributes)
    }

    /// A data source block of `type_name`.
    #[must_use]
    pub fn data_source(type_name: impl Into<String>, attributes: Value) -> Self {
        Self::typed(ConstructKind::DataSource, type_name, attributes)
    }

    /// A backend of `type_name` (`http`, `local`, `s3`...).
    #[must_use]
    pub fn backend(type_name: impl Into<String>, attributes: Value) -> Self {
        Self::typed(ConstructKind::Backend, type_name, attributes)
    }

    /// Kind of the declared construct.
    #[must_use]
    pub const fn kind(&self) -> ConstructKind {
        self.kind
    }

    /// Declared type name, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub(crate) fn into_parts(self) -> (ConstructKind, Option<String>, Value) {
        (self.kind, self.type_name, self.attributes)
    }
}

/// A single addressable unit in the construct tree.
#[derive(Clone, Debug)]
pub struct Node {
    id: String,
    path: ConstructPath,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    child_index: HashMap<String, NodeHandle>,
    kind: ConstructKind,
    type_name: Option<String>,
    attributes: Map<String, Value>,
}

impl Node {
    pub(crate) fn app() -> Self {
        Self {
            id: String::new(),
            path: ConstructPath::root(),
            parent: None,
            children: Vec::new(),
            child_index: HashMap::new(),
            kind: ConstructKind::App,
            type_name: None,
            attributes: Map::new(),
        }
    }

    pub(crate) fn new(
        id: String,
        path: ConstructPath,
        parent: NodeHandle,
        kind: ConstructKind,
        type_name: Option<String>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            path,
            parent: Some(parent),
            children: Vec::new(),
            child_index: HashMap::new(),
            kind,
            type_name,
            attributes,
        }
    }

    pub(crate) fn push_child(&mut self, id: String, handle: NodeHandle) {
        self.children.push(handle);
        self.child_index.insert(id, handle);
    }

    /// Identifier, unique among siblings. Empty for the app root.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full path from the app root.
    #[must_use]
    pub const fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// Parent handle; `None` only for the app root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Child handles in attach order.
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Looks up a direct child by id.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<NodeHandle> {
        self.child_index.get(id).copied()
    }

    /// Kind tag of the node.
    #[must_use]
    pub const fn kind(&self) -> ConstructKind {
        self.kind
    }

    /// Declared type name for contributing kinds.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Attribute payload.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
