//! Binds the synthesis feature file to the step registry.

use rstest_bdd_macros::scenarios;

use super::fixtures::{SynthesisContext, synthesis_context};

scenarios!(
    "tests/features/synthesis.feature",
    fixtures = [synthesis_context: SynthesisContext]
);
