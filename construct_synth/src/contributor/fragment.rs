//! Fragment types exchanged between contributors and the synthesizer.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Top-level document category a fragment is merged into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `provider.<type>.<id>`
    Provider,
    /// `resource.<type>.<id>`
    Resource,
    /// `data.<type>.<id>`
    Data,
    /// `terraform.backend.<type>`
    TerraformBackend,
}

impl Category {
    /// Dotted key of the category inside a document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Resource => "resource",
            Self::Data => "data",
            Self::TerraformBackend => "terraform.backend",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The part of a construct a contributor is allowed to see.
#[derive(Clone, Copy, Debug)]
pub struct FragmentSource<'a> {
    /// Construct id, unique among its siblings.
    pub id: &'a str,
    /// Declared type name.
    pub type_name: &'a str,
    /// Attribute payload.
    pub attributes: &'a Map<String, Value>,
}

impl FragmentSource<'_> {
    /// Looks up a single attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Configuration contributed by one construct.
///
/// ```
/// use construct_synth::{Category, ConfigFragment};
/// use serde_json::{Map, json};
/// let mut attributes = Map::new();
/// attributes.insert("inputs".into(), json!({"example": "example"}));
/// let fragment = ConfigFragment::new(Category::Data, "null_data_source", "r", attributes);
/// assert_eq!(
///     fragment.to_value(),
///     json!({"data": {"null_data_source": {"r": {"inputs": {"example": "example"}}}}})
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigFragment {
    category: Category,
    type_name: String,
    id: String,
    attributes: Map<String, Value>,
}

impl ConfigFragment {
    /// Create a fragment.
    #[must_use]
    pub fn new(
        category: Category,
        type_name: impl Into<String>,
        id: impl Into<String>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            category,
            type_name: type_name.into(),
            id: id.into(),
            attributes,
        }
    }

    /// Category the fragment is merged into.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Block type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Block id. Backends are addressed by type alone; their id is kept for
    /// diagnostics only.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Block body.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Splits the fragment into `(category, type name, id, attributes)`.
    #[must_use]
    pub fn into_parts(self) -> (Category, String, String, Map<String, Value>) {
        (self.category, self.type_name, self.id, self.attributes)
    }

    /// Renders the fragment as the document subtree it stands for.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let body = Value::Object(self.attributes.clone());
        match self.category {
            Category::TerraformBackend => nest(&["terraform", "backend", self.type_name.as_str()], body),
            other => nest(&[other.as_str(), self.type_name.as_str(), self.id.as_str()], body),
        }
    }
}

fn nest(keys: &[&str], leaf: Value) -> Value {
    keys.iter().rev().fold(leaf, |inner, key| {
        let mut map = Map::new();
        map.insert((*key).to_owned(), inner);
        Value::Object(map)
    })
}

/// Attribute validation failure reported by a contributor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{attribute}: {reason}")]
pub struct AttributeError {
    /// Attribute that is missing or malformed.
    pub attribute: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl AttributeError {
    /// A required attribute is absent.
    #[must_use]
    pub fn missing(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_owned(),
            reason: "required attribute is missing".to_owned(),
        }
    }

    /// An attribute is present but malformed.
    #[must_use]
    pub fn invalid(attribute: &str, reason: impl Into<String>) -> Self {
        Self {
            attribute: attribute.to_owned(),
            reason: reason.into(),
        }
    }
}
