//! Scope resolution: owning stack, owning app and stack-unique ids.

use sha2::{Digest, Sha256};

use super::builder::ConstructTree;
use super::node::{ConstructKind, NodeHandle};
use crate::{SynthError, SynthResult};

/// Path components dropped from logical ids, as they only add noise.
const HIDDEN_COMPONENTS: [&str; 2] = ["Default", "Resource"];

impl ConstructTree {
    /// Iterates `handle` and its ancestors, innermost first.
    ///
    /// Foreign handles yield nothing.
    pub fn ancestors(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.get(handle).map(|_| handle), |current| {
            self.get(*current).and_then(super::Node::parent)
        })
    }

    /// Nearest stack strictly above `handle`.
    ///
    /// Returns `Ok(None)` for the app root and for stacks, which sit directly
    /// below it.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] for foreign handles.
    pub fn owner_stack(&self, handle: NodeHandle) -> SynthResult<Option<NodeHandle>> {
        self.node(handle)?;
        Ok(self.ancestors(handle).skip(1).find(|ancestor| {
            self.get(*ancestor)
                .is_some_and(|node| node.kind() == ConstructKind::Stack)
        }))
    }

    /// The app root owning `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] for foreign handles.
    pub fn owner_app(&self, handle: NodeHandle) -> SynthResult<NodeHandle> {
        self.ancestors(handle)
            .last()
            .ok_or(SynthError::UnknownNode(handle))
    }

    /// Identifier of `handle` that is unique within its stack.
    ///
    /// Components below the owning stack are joined with `_`. When more than
    /// one component remains, the first eight hex digits of a SHA-256 over
    /// the full path are appended so that differently nested constructs never
    /// share an id.
    ///
    /// ```
    /// use construct_synth::{AppConfig, Construct, ConstructTree};
    /// use serde_json::json;
    /// let mut tree = ConstructTree::new(AppConfig::default());
    /// let stack = tree.add_stack("my-stack")?;
    /// let lone = tree.attach(stack, "lone", Construct::resource("null_resource", json!({})))?;
    /// assert_eq!(tree.logical_id(lone)?, "lone");
    /// # Ok::<_, construct_synth::SynthError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNode`] for foreign handles.
    pub fn logical_id(&self, handle: NodeHandle) -> SynthResult<String> {
        let node = self.node(handle)?;
        let components = node.path().components();
        let below_stack = components.get(1..).unwrap_or_default();
        let visible: Vec<String> = below_stack
            .iter()
            .filter(|component| !HIDDEN_COMPONENTS.contains(&component.as_str()))
            .map(|component| sanitize(component))
            .collect();

        match visible.as_slice() {
            [] => Ok(components.last().map(|c| sanitize(c)).unwrap_or_default()),
            [single] if below_stack.len() == 1 => Ok(single.clone()),
            _ => Ok(format!("{}_{}", visible.join("_"), path_digest(&node.path().to_string()))),
        }
    }
}

fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn path_digest(path: &str) -> String {
    let digest = Sha256::digest(path.as_bytes());
    format!("{digest:x}")
        .chars()
        .take(8)
        .collect::<String>()
        .to_ascii_uppercase()
}
