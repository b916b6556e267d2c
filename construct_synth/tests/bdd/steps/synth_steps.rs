//! Steps running synthesis and inspecting its documents.

use anyhow::{Context, Result, ensure};
use construct_synth::{Category, SynthError, synthesize};
use rstest_bdd_macros::{then, when};
use serde_json::Value;
use test_helpers::text::normalize_scalar;

use super::with_tree;
use crate::bdd::fixtures::{SynthesisContext, registry};

#[when("the app is synthesized")]
fn the_app_is_synthesized(synthesis_context: &SynthesisContext) -> Result<()> {
    let outcome = with_tree(synthesis_context, |tree| Ok(synthesize(tree, &registry())))?;
    match outcome {
        Ok(synthesis) => synthesis_context.synthesis.set(synthesis),
        Err(err) => synthesis_context.synth_error.set(err),
    }
    Ok(())
}

/// Clones the document of `stack` out of the last synthesis.
fn document(synthesis_context: &SynthesisContext, stack: &str) -> Result<Value> {
    let id = normalize_scalar(stack);
    synthesis_context
        .synthesis
        .with_ref(|synthesis| synthesis.get(&id).map(|doc| doc.as_value().clone()))
        .context("the app has not been synthesized")?
        .with_context(|| format!("no document for stack '{id}'"))
}

#[then("stack {stack} uses the {backend} backend at {address}")]
fn uses_backend(
    synthesis_context: &SynthesisContext,
    stack: String,
    backend: String,
    address: String,
) -> Result<()> {
    let value = document(synthesis_context, &stack)?;
    let backend = normalize_scalar(&backend);
    let actual = value
        .pointer(&format!("/terraform/backend/{backend}/address"))
        .and_then(Value::as_str);
    ensure!(
        actual == Some(normalize_scalar(&address).as_str()),
        "backend address was {actual:?}"
    );
    ensure!(
        value.get(Category::Resource.as_str()).is_none(),
        "the backend leaked into the resource section"
    );
    Ok(())
}

#[then("stack {stack} reads null_data_source {id} with example input {expected}")]
fn reads_data_source(
    synthesis_context: &SynthesisContext,
    stack: String,
    id: String,
    expected: String,
) -> Result<()> {
    let value = document(synthesis_context, &stack)?;
    let pointer = format!("/data/null_data_source/{}/inputs/example", normalize_scalar(&id));
    let actual = value.pointer(&pointer).and_then(Value::as_str);
    ensure!(
        actual == Some(normalize_scalar(&expected).as_str()),
        "data source input was {actual:?}"
    );
    Ok(())
}

#[then("synthesis fails with a duplicate resource error")]
fn fails_with_duplicate_resource(synthesis_context: &SynthesisContext) -> Result<()> {
    ensure!(
        synthesis_context.synthesis.is_empty(),
        "synthesis unexpectedly produced documents"
    );
    let matched = synthesis_context
        .synth_error
        .with_ref(|err| matches!(err, SynthError::DuplicateResource { .. }));
    ensure!(matched == Some(true), "expected a duplicate resource error");
    Ok(())
}

#[then("{count:u8} documents are produced")]
fn documents_are_produced(synthesis_context: &SynthesisContext, count: u8) -> Result<()> {
    let produced = synthesis_context
        .synthesis
        .with_ref(construct_synth::Synthesis::len)
        .context("the app has not been synthesized")?;
    ensure!(produced == usize::from(count), "{produced} documents were produced");
    Ok(())
}

#[then("stack {stack} has null resource {present} but not {absent}")]
fn has_only_own_resource(
    synthesis_context: &SynthesisContext,
    stack: String,
    present: String,
    absent: String,
) -> Result<()> {
    let value = document(synthesis_context, &stack)?;
    let resources = value
        .pointer("/resource/null_resource")
        .and_then(Value::as_object)
        .context("stack has no null resources")?;
    ensure!(resources.contains_key(&normalize_scalar(&present)));
    ensure!(!resources.contains_key(&normalize_scalar(&absent)));
    Ok(())
}
