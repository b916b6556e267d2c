//! Arena-backed construct tree and the `attach` operation.

use std::collections::HashMap;

use serde_json::Value;

use super::node::{Construct, ConstructKind, ConstructPath, Node, NodeHandle, PATH_SEPARATOR};
use crate::{AppConfig, SynthError, SynthResult};

/// Id under which [`ConstructTree::add_backend`] attaches backends.
pub const BACKEND_ID: &str = "backend";

/// The construct tree rooted at a single app.
///
/// Nodes live in an arena and refer to each other through [`NodeHandle`]s.
/// The tree owns the [`AppConfig`] it was created with and the registry of
/// its stacks, in creation order.
#[derive(Clone, Debug)]
pub struct ConstructTree {
    config: AppConfig,
    nodes: Vec<Node>,
    stacks: Vec<NodeHandle>,
    backends: HashMap<NodeHandle, NodeHandle>,
}

impl ConstructTree {
    /// Create a tree containing only the app root.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            nodes: vec![Node::app()],
            stacks: Vec::new(),
            backends: HashMap::new(),
        }
    }

    /// Application configuration owned by the app root.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle of the app root.
    #[must_use]
    pub const fn root(&self) -> NodeHandle {
        NodeHandle::ROOT
    }

    /// Looks up a node.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] when `handle` is not part of this
    /// tree.
    pub fn node(&self, handle: NodeHandle) -> SynthResult<&Node> {
        self.get(handle).ok_or(SynthError::UnknownNode(handle))
    }

    /// Looks up a node, returning `None` for foreign handles.
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.index())
    }

    /// Child handles of `handle` in attach order.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] for foreign handles.
    pub fn children(&self, handle: NodeHandle) -> SynthResult<&[NodeHandle]> {
        Ok(self.node(handle)?.children())
    }

    /// The child of `handle` named `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] for foreign handles.
    pub fn child(&self, handle: NodeHandle, id: &str) -> SynthResult<Option<NodeHandle>> {
        Ok(self.node(handle)?.child(id))
    }

    /// Resolves a `/`-separated path relative to the app root.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<NodeHandle> {
        path.split(PATH_SEPARATOR)
            .filter(|component| !component.is_empty())
            .try_fold(self.root(), |current, id| self.get(current)?.child(id))
    }

    /// Stacks in creation order.
    #[must_use]
    pub fn stacks(&self) -> &[NodeHandle] {
        &self.stacks
    }

    /// The backend declared somewhere below `stack`, if any.
    #[must_use]
    pub fn backend_of(&self, stack: NodeHandle) -> Option<NodeHandle> {
        self.backends.get(&stack).copied()
    }

    /// Number of nodes, including the app root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first traversal in attach order, starting at the app root.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            pending: vec![self.root()],
        }
    }

    /// Attach a new construct below `parent`.
    ///
    /// # Errors
    ///
    /// - [`SynthError::UnknownNode`] when `parent` is not part of this tree;
    /// - [`SynthError::InvalidId`] when `id` is empty, contains `/`, or is
    ///   `.` or `..`;
    /// - [`SynthError::InvalidNesting`] when the kind may not live below
    ///   `parent`, or a second backend is attached to the same stack;
    /// - [`SynthError::DuplicateId`] when `parent` already has a child `id`;
    /// - [`SynthError::InvalidAttribute`] when the attributes are not a JSON
    ///   object.
    pub fn attach(
        &mut self,
        parent: NodeHandle,
        id: impl Into<String>,
        construct: Construct,
    ) -> SynthResult<NodeHandle> {
        let id = id.into();
        let parent_node = self.node(parent)?;
        validate_id(&id)?;
        let path = parent_node.path().child(id.as_str());
        let (kind, type_name, attributes) = construct.into_parts();

        let owner_stack = self.check_nesting(parent, &path, kind)?;
        if parent_node.child(&id).is_some() {
            return Err(SynthError::DuplicateId {
                parent: parent_node.path().clone(),
                id,
            });
        }
        let Value::Object(attributes) = attributes else {
            return Err(SynthError::InvalidAttribute {
                path,
                attribute: "attributes".to_owned(),
                reason: "attributes must be a JSON object".to_owned(),
            });
        };

        let raw = u32::try_from(self.nodes.len()).map_err(|_| {
            SynthError::invalid_nesting(path.clone(), kind, "construct tree is full")
        })?;
        let handle = NodeHandle::from(raw);
        tracing::debug!(path = %path, kind = %kind, "attaching construct");
        self.nodes.push(Node::new(
            id.clone(),
            path,
            parent,
            kind,
            type_name,
            attributes,
        ));
        self.nodes
            .get_mut(parent.index())
            .ok_or(SynthError::UnknownNode(parent))?
            .push_child(id, handle);

        match kind {
            ConstructKind::Stack => self.stacks.push(handle),
            ConstructKind::Backend => {
                if let Some(stack) = owner_stack {
                    self.backends.insert(stack, handle);
                }
            }
            _ => {}
        }
        Ok(handle)
    }

    /// Attach a stack directly below the app root.
    ///
    /// # Errors
    ///
    /// See [`ConstructTree::attach`].
    pub fn add_stack(&mut self, id: impl Into<String>) -> SynthResult<NodeHandle> {
        self.attach(self.root(), id, Construct::stack())
    }

    /// Attach a backend below `scope` under the fixed id `backend`.
    ///
    /// # Errors
    ///
    /// See [`ConstructTree::attach`].
    pub fn add_backend(
        &mut self,
        scope: NodeHandle,
        type_name: impl Into<String>,
        attributes: Value,
    ) -> SynthResult<NodeHandle> {
        self.attach(scope, BACKEND_ID, Construct::backend(type_name, attributes))
    }

    /// Applies the structural rules, returning the owning stack of the new
    /// node (`None` for stacks).
    fn check_nesting(
        &self,
        parent: NodeHandle,
        path: &ConstructPath,
        kind: ConstructKind,
    ) -> SynthResult<Option<NodeHandle>> {
        let parent_kind = self.node(parent)?.kind();
        match (kind, parent_kind) {
            (ConstructKind::App, _) => Err(SynthError::invalid_nesting(
                path.clone(),
                kind,
                "an app can only be the root of a tree",
            )),
            (ConstructKind::Stack, ConstructKind::App) => Ok(None),
            (ConstructKind::Stack, _) => Err(SynthError::invalid_nesting(
                path.clone(),
                kind,
                "stacks must be attached directly to the app",
            )),
            (_, ConstructKind::App) => Err(SynthError::invalid_nesting(
                path.clone(),
                kind,
                "only stacks may be attached to the app",
            )),
            (ConstructKind::Backend, _) => {
                let stack = self.enclosing_stack(parent)?;
                if let Some(existing) = stack.and_then(|s| self.backend_of(s)) {
                    let existing_path = self.node(existing)?.path();
                    return Err(SynthError::invalid_nesting(
                        path.clone(),
                        kind,
                        format!("stack already declares a backend at '{existing_path}'"),
                    ));
                }
                Ok(stack)
            }
            _ => self.enclosing_stack(parent),
        }
    }

    /// The stack a child of `parent` belongs to: `parent` itself when it is a
    /// stack, otherwise its owner stack.
    fn enclosing_stack(&self, parent: NodeHandle) -> SynthResult<Option<NodeHandle>> {
        if self.node(parent)?.kind() == ConstructKind::Stack {
            return Ok(Some(parent));
        }
        self.owner_stack(parent)
    }
}

fn validate_id(id: &str) -> SynthResult<()> {
    let reason = if id.is_empty() {
        "ids must not be empty"
    } else if id.contains(PATH_SEPARATOR) {
        "ids must not contain '/'"
    } else if matches!(id, "." | "..") {
        "ids must not be '.' or '..'"
    } else {
        return Ok(());
    };
    Err(SynthError::InvalidId {
        id: id.to_owned(),
        reason: reason.to_owned(),
    })
}

/// Depth-first iterator over a [`ConstructTree`], yielding handles in attach
/// order.
#[derive(Debug)]
pub struct Walk<'a> {
    tree: &'a ConstructTree,
    pending: Vec<NodeHandle>,
}

impl Iterator for Walk<'_> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.pending.pop()?;
        if let Some(node) = self.tree.get(handle) {
            self.pending.extend(node.children().iter().rev());
        }
        Some(handle)
    }
}
