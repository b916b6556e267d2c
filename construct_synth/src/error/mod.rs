//! Error types produced while building and synthesizing construct trees.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::SynthError;
