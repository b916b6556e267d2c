//! Step implementations for the synthesis scenarios.

mod synth_steps;
mod tree_steps;

use anyhow::{Context, Result};
use construct_synth::{ConstructTree, NodeHandle};
use test_helpers::text::normalize_scalar;

use super::fixtures::SynthesisContext;

/// Runs `f` against the scenario's tree, putting the tree back afterwards.
fn with_tree<T>(
    context: &SynthesisContext,
    f: impl FnOnce(&mut ConstructTree) -> Result<T>,
) -> Result<T> {
    let mut tree = context
        .tree
        .take()
        .context("the scenario has not created an app")?;
    let outcome = f(&mut tree);
    context.tree.set(tree);
    outcome
}

/// Handle of the stack whose id is given as a (possibly quoted) step argument.
fn stack_handle(tree: &ConstructTree, raw_id: &str) -> Result<NodeHandle> {
    let id = normalize_scalar(raw_id);
    tree.find(&id)
        .with_context(|| format!("stack '{id}' was not declared"))
}
