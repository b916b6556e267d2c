//! Synthesized per-stack documents.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::contributor::Category;
use crate::{SynthResult, SynthResultExt};

/// Reserved top-level key holding synthesis metadata.
pub const METADATA_KEY: &str = "//";

/// Immutable configuration document produced for one stack.
///
/// The document is a JSON object whose top-level keys appear in the fixed
/// order `//`, `terraform`, `provider`, `data`, `resource`; empty sections are
/// omitted, so a stack without contributions renders as `{}`. Below the top
/// level, keys keep the order in which constructs were attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument(Value);

impl ConfigDocument {
    pub(crate) const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The document as a JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the document, returning the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether no construct contributed to the document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.as_object().is_none_or(Map::is_empty)
    }

    /// The `type -> id -> attributes` map of a category, or for
    /// [`Category::TerraformBackend`] the `type -> attributes` map.
    #[must_use]
    pub fn section(&self, category: Category) -> Option<&Map<String, Value>> {
        let value = match category {
            Category::TerraformBackend => self.0.get("terraform")?.get("backend")?,
            other => self.0.get(other.as_str())?,
        };
        value.as_object()
    }

    /// Attributes of the block `category.type_name.id`.
    ///
    /// Backends are addressed by type alone; use [`ConfigDocument::backend`].
    #[must_use]
    pub fn block(&self, category: Category, type_name: &str, id: &str) -> Option<&Map<String, Value>> {
        if category == Category::TerraformBackend {
            return None;
        }
        self.section(category)?.get(type_name)?.get(id)?.as_object()
    }

    /// The backend type and attributes, if the stack declares one.
    #[must_use]
    pub fn backend(&self) -> Option<(&str, &Map<String, Value>)> {
        self.section(Category::TerraformBackend)?
            .iter()
            .find_map(|(type_name, body)| Some((type_name.as_str(), body.as_object()?)))
    }

    /// Compact JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Json`] if serialisation fails.
    pub fn to_json(&self) -> SynthResult<String> {
        serde_json::to_string(&self.0).into_synth()
    }

    /// Indented JSON rendering, as written to disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Json`] if serialisation fails.
    pub fn to_json_pretty(&self) -> SynthResult<String> {
        serde_json::to_string_pretty(&self.0).into_synth()
    }
}
