//! Shared fixtures for the behavioural scenarios.

use construct_synth::{ConstructTree, ContributorRegistry, SynthError, Synthesis};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State carried across the steps of one synthesis scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct SynthesisContext {
    /// Tree under construction.
    pub tree: Slot<ConstructTree>,
    /// Documents of the last successful synthesis.
    pub synthesis: Slot<Synthesis>,
    /// Last error returned by an attach call.
    pub attach_error: Slot<SynthError>,
    /// Error returned by the last synthesis.
    pub synth_error: Slot<SynthError>,
}

/// Fresh scenario state.
#[fixture]
pub fn synthesis_context() -> SynthesisContext {
    SynthesisContext::default()
}

/// Registry with the stock contributors.
pub fn registry() -> ContributorRegistry {
    ContributorRegistry::with_stock_contributors()
}
