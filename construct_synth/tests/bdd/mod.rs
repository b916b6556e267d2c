//! `rstest-bdd` scaffolding for `construct_synth`.
//!
//! [`fixtures`] holds the scenario state shared between steps, [`steps`]
//! registers the step implementations and [`scenarios`] binds the feature
//! file to them.

mod fixtures;
mod scenarios;
mod steps;
