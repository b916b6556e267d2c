//! Primary error enum for tree construction and synthesis.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::contributor::Category;
use crate::tree::{ConstructKind, ConstructPath, NodeHandle};

/// Errors that can occur while building a construct tree or synthesizing it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// A sibling with the same id already exists under the parent.
    #[error("construct '{id}' already exists under '{parent}'")]
    DuplicateId {
        /// Path of the parent that already owns `id`.
        parent: ConstructPath,
        /// Identifier that collided.
        id: String,
    },

    /// The identifier cannot be used as a path component.
    #[error("invalid construct id '{id}': {reason}")]
    InvalidId {
        /// Rejected identifier.
        id: String,
        /// Why the identifier was rejected.
        reason: String,
    },

    /// The construct kind may not be attached at this position.
    #[error("cannot attach {kind} at '{path}': {reason}")]
    InvalidNesting {
        /// Path the construct would have occupied.
        path: ConstructPath,
        /// Kind of the rejected construct.
        kind: ConstructKind,
        /// Structural rule that was violated.
        reason: String,
    },

    /// A contributor rejected one of the construct's attributes.
    #[error("invalid attribute '{attribute}' on '{path}': {reason}")]
    InvalidAttribute {
        /// Path of the offending construct.
        path: ConstructPath,
        /// Attribute that is missing or malformed.
        attribute: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// Two constructs in one stack emitted the same block address.
    #[error(
        "duplicate {category} block '{type_name}.{id}' in stack '{stack}': declared by '{first}' and '{second}'"
    )]
    DuplicateResource {
        /// Stack whose document received both fragments.
        stack: String,
        /// Top-level document category of the block.
        category: Category,
        /// Block type name.
        type_name: String,
        /// Block identifier.
        id: String,
        /// Construct that emitted the block first.
        first: ConstructPath,
        /// Construct whose fragment collided.
        second: ConstructPath,
    },

    /// The handle does not belong to this tree.
    #[error("unknown construct handle {0}")]
    UnknownNode(NodeHandle),

    /// No contributor is registered for a contributing construct.
    #[error("no contributor registered for {kind} type '{type_name}' at '{path}'")]
    UnknownConstructType {
        /// Path of the construct.
        path: ConstructPath,
        /// Kind of the construct.
        kind: ConstructKind,
        /// Declared type name.
        type_name: String,
    },

    /// Several failures were collected by a validation pass.
    #[error("multiple synthesis errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),

    /// Writing an artefact failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialising a document failed.
    #[error("failed to serialise document: {0}")]
    Json(#[from] serde_json::Error),

    /// Loading the application configuration failed.
    #[error("failed to load application configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}
