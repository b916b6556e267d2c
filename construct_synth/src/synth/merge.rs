//! Per-stack accumulation of fragments.
//!
//! Fragments are merged into one map per category. A block address
//! (`category`, `type`, `id`) is claimed by the first construct emitting it;
//! a later claim is a [`SynthError::DuplicateResource`], never an overwrite.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::document::{ConfigDocument, METADATA_KEY};
use crate::contributor::{Category, ConfigFragment};
use crate::tree::ConstructPath;
use crate::{SynthError, SynthResult};

type BlockAddress = (Category, String, String);

/// Accumulates the fragments of a single stack.
#[derive(Debug)]
pub(crate) struct DocumentBuilder {
    stack: String,
    provider: Map<String, Value>,
    data: Map<String, Value>,
    resource: Map<String, Value>,
    backend: Option<(String, Map<String, Value>)>,
    origins: HashMap<BlockAddress, ConstructPath>,
}

impl DocumentBuilder {
    pub(crate) fn new(stack: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            provider: Map::new(),
            data: Map::new(),
            resource: Map::new(),
            backend: None,
            origins: HashMap::new(),
        }
    }

    pub(crate) fn stack(&self) -> &str {
        &self.stack
    }

    /// Merges `fragment`, emitted by the construct at `origin`.
    ///
    /// `metadata` is prepended to the block body under `//` when present.
    pub(crate) fn merge(
        &mut self,
        fragment: ConfigFragment,
        origin: &ConstructPath,
        metadata: Option<Value>,
    ) -> SynthResult<()> {
        let (category, type_name, id, attributes) = fragment.into_parts();
        // A stack holds a single backend, whatever its type.
        let address = if category == Category::TerraformBackend {
            (category, String::new(), String::new())
        } else {
            (category, type_name.clone(), id.clone())
        };
        if let Some(first) = self.origins.get(&address) {
            return Err(SynthError::DuplicateResource {
                stack: self.stack.clone(),
                category,
                type_name,
                id,
                first: first.clone(),
                second: origin.clone(),
            });
        }

        let body = with_metadata(attributes, metadata);
        let section = match category {
            Category::Provider => &mut self.provider,
            Category::Data => &mut self.data,
            Category::Resource => &mut self.resource,
            Category::TerraformBackend => {
                tracing::debug!(stack = %self.stack, backend = %type_name, "merging backend");
                self.backend = Some((type_name, body));
                self.origins.insert(address, origin.clone());
                return Ok(());
            }
        };

        tracing::debug!(
            stack = %self.stack,
            category = %category,
            type_name = %type_name,
            id = %id,
            "merging fragment"
        );
        let by_type = section
            .entry(type_name)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(by_id) = by_type {
            by_id.insert(id, Value::Object(body));
        }
        self.origins.insert(address, origin.clone());
        Ok(())
    }

    /// Number of blocks merged so far, the backend included.
    pub(crate) fn block_count(&self) -> usize {
        self.origins.len()
    }

    pub(crate) fn backend_type(&self) -> Option<&str> {
        self.backend.as_ref().map(|(type_name, _)| type_name.as_str())
    }

    /// Assembles the document with the top-level keys in their fixed order.
    pub(crate) fn finish(self, header: Option<Value>) -> ConfigDocument {
        let mut document = Map::new();
        if let Some(header) = header {
            document.insert(METADATA_KEY.to_owned(), header);
        }
        if let Some((type_name, body)) = self.backend {
            let mut backend = Map::new();
            backend.insert(type_name, Value::Object(body));
            let mut terraform = Map::new();
            terraform.insert("backend".to_owned(), Value::Object(backend));
            document.insert("terraform".to_owned(), Value::Object(terraform));
        }
        for (key, section) in [
            (Category::Provider, self.provider),
            (Category::Data, self.data),
            (Category::Resource, self.resource),
        ] {
            if !section.is_empty() {
                document.insert(key.as_str().to_owned(), Value::Object(section));
            }
        }
        ConfigDocument::from_value(Value::Object(document))
    }
}

fn with_metadata(attributes: Map<String, Value>, metadata: Option<Value>) -> Map<String, Value> {
    let Some(metadata) = metadata else {
        return attributes;
    };
    let mut body = Map::with_capacity(attributes.len() + 1);
    body.insert(METADATA_KEY.to_owned(), metadata);
    body.extend(attributes);
    body
}
