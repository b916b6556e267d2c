//! Identical construction yields byte-identical documents.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface construction mistakes"
)]

use construct_synth::{AppConfig, Construct, ConstructTree, ContributorRegistry, synthesize};
use rstest::rstest;
use serde_json::json;

fn build(emit_metadata: bool) -> ConstructTree {
    let config = AppConfig {
        emit_metadata,
        ..AppConfig::default()
    };
    let mut tree = ConstructTree::new(config);
    for stack_id in ["beta", "alpha"] {
        let stack = tree.add_stack(stack_id).expect("stack");
        tree.add_backend(stack, "s3", json!({"bucket": "state", "key": stack_id, "region": "eu-west-1"}))
            .expect("backend");
        tree.attach(stack, "null", Construct::provider("null", json!({})))
            .expect("provider");
        let group = tree.attach(stack, "group", Construct::element()).expect("group");
        for id in ["zulu", "alpha", "mike"] {
            tree.attach(
                group,
                id,
                Construct::resource("null_resource", json!({"triggers": {"z": "1", "a": "2"}})),
            )
            .expect("resource");
        }
    }
    tree
}

fn render(tree: &ConstructTree) -> Vec<(String, String)> {
    let registry = ContributorRegistry::with_stock_contributors();
    synthesize(tree, &registry)
        .expect("synthesis")
        .iter()
        .map(|(id, document)| (id.to_owned(), document.to_json().expect("json")))
        .collect()
}

#[rstest]
#[case::plain(false)]
#[case::with_metadata(true)]
fn rebuilding_produces_identical_bytes(#[case] emit_metadata: bool) {
    let first = render(&build(emit_metadata));
    let second = render(&build(emit_metadata));
    assert_eq!(first, second);
}

#[rstest]
fn blocks_keep_attach_order() {
    let rendered = render(&build(false));
    let (_, beta) = rendered.first().expect("beta document");
    let zulu = beta.find("\"zulu\"").expect("zulu");
    let alpha = beta.find("\"alpha\"").expect("alpha");
    let mike = beta.find("\"mike\"").expect("mike");
    assert!(zulu < alpha && alpha < mike, "{beta}");

    let z = beta.find("\"z\"").expect("z trigger");
    let a = beta.find("\"a\"").expect("a trigger");
    assert!(z < a, "attribute order must be preserved: {beta}");
}
