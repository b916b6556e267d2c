//! Configuration contributors: the capability table behind fragment emission.
//!
//! Provider, resource, data source and backend constructs each contribute a
//! [`ConfigFragment`] to their stack's document. Contributors are plain
//! function pointers registered per `(kind, type name)` in a
//! [`ContributorRegistry`], with an optional per-kind fallback. A contributor
//! sees only its own construct's id, type name and attributes.

mod fragment;
mod registry;
mod stock;

pub use fragment::{AttributeError, Category, ConfigFragment, FragmentSource};
pub use registry::{ContributeFn, ContributorRegistry};
pub use stock::{
    http_backend, local_backend, pass_through_data, pass_through_provider,
    pass_through_resource, s3_backend,
};
