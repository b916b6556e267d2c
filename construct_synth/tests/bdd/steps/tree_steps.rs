//! Steps building construct trees.

use anyhow::{Result, ensure};
use cdktf_fixture::sample_app;
use construct_synth::{AppConfig, Construct, ConstructTree, SynthError};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use test_helpers::text::normalize_scalar;

use super::{stack_handle, with_tree};
use crate::bdd::fixtures::SynthesisContext;

#[given("the sample app")]
fn the_sample_app(synthesis_context: &SynthesisContext) -> Result<()> {
    synthesis_context.tree.set(sample_app(AppConfig::default())?);
    Ok(())
}

#[given("an empty app")]
fn an_empty_app(synthesis_context: &SynthesisContext) {
    synthesis_context
        .tree
        .set(ConstructTree::new(AppConfig::default()));
}

#[given("a stack named {id}")]
fn a_stack_named(synthesis_context: &SynthesisContext, id: String) -> Result<()> {
    with_tree(synthesis_context, |tree| {
        tree.add_stack(normalize_scalar(&id))?;
        Ok(())
    })
}

#[given("stack {stack} has a local backend")]
fn stack_has_local_backend(synthesis_context: &SynthesisContext, stack: String) -> Result<()> {
    with_tree(synthesis_context, |tree| {
        let handle = stack_handle(tree, &stack)?;
        tree.add_backend(handle, "local", json!({}))?;
        Ok(())
    })
}

#[given("stack {stack} holding null resource {resource}")]
fn stack_holding_resource(
    synthesis_context: &SynthesisContext,
    stack: String,
    resource: String,
) -> Result<()> {
    with_tree(synthesis_context, |tree| {
        let handle = tree.add_stack(normalize_scalar(&stack))?;
        tree.attach(
            handle,
            normalize_scalar(&resource),
            Construct::resource("null_resource", json!({})),
        )?;
        Ok(())
    })
}

#[given("elements {left} and {right} in stack {stack} each holding null resource {resource}")]
fn elements_holding_same_resource(
    synthesis_context: &SynthesisContext,
    left: String,
    right: String,
    stack: String,
    resource: String,
) -> Result<()> {
    with_tree(synthesis_context, |tree| {
        let handle = stack_handle(tree, &stack)?;
        for element_id in [&left, &right] {
            let element = tree.attach(handle, normalize_scalar(element_id), Construct::element())?;
            tree.attach(
                element,
                normalize_scalar(&resource),
                Construct::resource("null_resource", json!({})),
            )?;
        }
        Ok(())
    })
}

#[when("a null resource {resource} is attached to stack {stack} twice")]
fn attach_resource_twice(
    synthesis_context: &SynthesisContext,
    resource: String,
    stack: String,
) -> Result<()> {
    let error = with_tree(synthesis_context, |tree| {
        let handle = stack_handle(tree, &stack)?;
        let id = normalize_scalar(&resource);
        tree.attach(handle, id.clone(), Construct::resource("null_resource", json!({})))?;
        Ok(tree
            .attach(handle, id, Construct::resource("null_resource", json!({})))
            .err())
    })?;
    ensure!(error.is_some(), "the second attach unexpectedly succeeded");
    if let Some(err) = error {
        synthesis_context.attach_error.set(err);
    }
    Ok(())
}

#[when("a second backend is added to stack {stack}")]
fn add_second_backend(synthesis_context: &SynthesisContext, stack: String) -> Result<()> {
    let outcome = with_tree(synthesis_context, |tree| {
        let handle = stack_handle(tree, &stack)?;
        Ok(tree.add_backend(handle, "http", json!({"address": "http://other"})))
    })?;
    match outcome {
        Ok(_) => anyhow::bail!("the second backend was accepted"),
        Err(err) => {
            synthesis_context.attach_error.set(err);
            Ok(())
        }
    }
}

#[then("attaching fails with a duplicate id error")]
fn fails_with_duplicate_id(synthesis_context: &SynthesisContext) -> Result<()> {
    let matched = synthesis_context
        .attach_error
        .with_ref(|err| matches!(err, SynthError::DuplicateId { .. }));
    ensure!(matched == Some(true), "expected a duplicate id error");
    Ok(())
}

#[then("attaching fails with an invalid nesting error")]
fn fails_with_invalid_nesting(synthesis_context: &SynthesisContext) -> Result<()> {
    let matched = synthesis_context
        .attach_error
        .with_ref(|err| matches!(err, SynthError::InvalidNesting { .. }));
    ensure!(matched == Some(true), "expected an invalid nesting error");
    Ok(())
}
