//! Construct tree: arena storage, the `attach` builder and scope resolution.
//!
//! A tree always starts with an app root. Stacks hang directly off the app;
//! providers, resources, data sources, backends and grouping elements live
//! below a stack, nested as deeply as callers like. Every node receives its
//! path when attached and keeps it for the lifetime of the tree.

mod builder;
mod node;
mod scope;

pub use builder::{BACKEND_ID, ConstructTree, Walk};
pub use node::{Construct, ConstructKind, ConstructPath, Node, NodeHandle, PATH_SEPARATOR};
