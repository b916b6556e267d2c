//! Test helpers shared across the `construct_synth` workspace.

pub mod env;
pub mod jail;
pub mod text;
