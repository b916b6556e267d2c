//! Fixture constructs used by the workspace's integration tests.
//!
//! `MyStack` is a stack carrying an HTTP backend and the `null` provider;
//! `MyResource` is a grouping element holding a single `null_data_source`
//! named `Resource`. [`sample_app`] assembles the two the same way a small
//! application would: one stack `my-stack` holding one `my-resource`.

use construct_synth::{AppConfig, Construct, ConstructTree, NodeHandle, SynthResult};
use serde::Serialize;
use serde_json::json;

/// Stack id used by [`sample_app`].
pub const SAMPLE_STACK_ID: &str = "my-stack";
/// Element id used by [`sample_app`].
pub const SAMPLE_RESOURCE_ID: &str = "my-resource";
/// Backend address used by [`sample_app`].
pub const SAMPLE_BACKEND_ADDRESS: &str = "http://localhost:1234";

/// Attributes of an HTTP state backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HttpBackendConfig {
    /// State endpoint.
    pub address: String,
    /// Endpoint used to acquire the state lock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_address: Option<String>,
    /// Endpoint used to release the state lock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_address: Option<String>,
}

impl HttpBackendConfig {
    /// Backend config with only an address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Adds a stack with an HTTP backend and the `null` provider.
///
/// # Errors
///
/// Propagates attach failures, for instance when `id` is already taken.
pub fn my_stack(
    tree: &mut ConstructTree,
    id: &str,
    backend: &HttpBackendConfig,
) -> SynthResult<NodeHandle> {
    let stack = tree.add_stack(id)?;
    let attributes = serde_json::to_value(backend)?;
    tree.add_backend(stack, "http", attributes)?;
    tree.attach(stack, "null", Construct::provider("null", json!({})))?;
    Ok(stack)
}

/// Adds an element holding a `null_data_source` named `Resource`.
///
/// # Errors
///
/// Propagates attach failures.
pub fn my_resource(tree: &mut ConstructTree, scope: NodeHandle, id: &str) -> SynthResult<NodeHandle> {
    let element = tree.attach(scope, id, Construct::element())?;
    tree.attach(
        element,
        "Resource",
        Construct::data_source("null_data_source", json!({"inputs": {"example": "example"}})),
    )?;
    Ok(element)
}

/// Builds the sample application: `my-stack` holding `my-resource`.
///
/// # Errors
///
/// Propagates attach failures.
pub fn sample_app(config: AppConfig) -> SynthResult<ConstructTree> {
    let mut tree = ConstructTree::new(config);
    let stack = my_stack(&mut tree, SAMPLE_STACK_ID, &HttpBackendConfig::new(SAMPLE_BACKEND_ADDRESS))?;
    my_resource(&mut tree, stack, SAMPLE_RESOURCE_ID)?;
    Ok(tree)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic to surface fixture mistakes")]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn sample_app_has_the_expected_paths() -> SynthResult<()> {
        let tree = sample_app(AppConfig::default())?;
        for path in [
            "my-stack",
            "my-stack/backend",
            "my-stack/null",
            "my-stack/my-resource",
            "my-stack/my-resource/Resource",
        ] {
            assert!(tree.find(path).is_some(), "missing {path}");
        }
        Ok(())
    }

    #[rstest]
    fn optional_lock_addresses_are_omitted() -> SynthResult<()> {
        let mut tree = ConstructTree::new(AppConfig::default());
        let stack = my_stack(&mut tree, "s", &HttpBackendConfig::new("http://state"))?;
        let backend = tree.backend_of(stack).expect("backend attached");
        let attributes = tree.node(backend)?.attributes();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("address"), Some(&json!("http://state")));
        Ok(())
    }
}
