//! Stock contributors shipped with the crate.

use serde_json::{Map, Value};

use super::fragment::{AttributeError, Category, ConfigFragment, FragmentSource};

/// Emits `provider.<type>.<id>` with the construct's attributes.
///
/// # Errors
///
/// Returns an [`AttributeError`] when the type name is not a valid block
/// label.
pub fn pass_through_provider(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    pass_through(Category::Provider, source)
}

/// Emits `resource.<type>.<id>` with the construct's attributes.
///
/// # Errors
///
/// Returns an [`AttributeError`] when the type name is not a valid block
/// label.
pub fn pass_through_resource(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    pass_through(Category::Resource, source)
}

/// Emits `data.<type>.<id>` with the construct's attributes.
///
/// # Errors
///
/// Returns an [`AttributeError`] when the type name is not a valid block
/// label.
pub fn pass_through_data(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    pass_through(Category::Data, source)
}

/// HTTP backend: `address` is required.
///
/// # Errors
///
/// Returns an [`AttributeError`] when `address` is missing or blank, or when
/// one of the lock addresses is not a string.
pub fn http_backend(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    require_string(source, "address")?;
    optional_string(source, "lock_address")?;
    optional_string(source, "unlock_address")?;
    Ok(backend(source))
}

/// Local backend: `path` is optional.
///
/// # Errors
///
/// Returns an [`AttributeError`] when `path` is present but not a string.
pub fn local_backend(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    optional_string(source, "path")?;
    Ok(backend(source))
}

/// S3 backend: `bucket`, `key` and `region` are required.
///
/// # Errors
///
/// Returns an [`AttributeError`] naming the first missing or blank attribute.
pub fn s3_backend(source: &FragmentSource<'_>) -> Result<ConfigFragment, AttributeError> {
    for attribute in ["bucket", "key", "region"] {
        require_string(source, attribute)?;
    }
    Ok(backend(source))
}

fn pass_through(
    category: Category,
    source: &FragmentSource<'_>,
) -> Result<ConfigFragment, AttributeError> {
    validate_type_name(source.type_name)?;
    Ok(ConfigFragment::new(
        category,
        source.type_name,
        source.id,
        strip_nulls(source.attributes),
    ))
}

fn backend(source: &FragmentSource<'_>) -> ConfigFragment {
    ConfigFragment::new(
        Category::TerraformBackend,
        source.type_name,
        source.id,
        strip_nulls(source.attributes),
    )
}

fn validate_type_name(type_name: &str) -> Result<(), AttributeError> {
    let is_label = !type_name.is_empty()
        && type_name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if is_label {
        Ok(())
    } else {
        Err(AttributeError::invalid(
            "type",
            format!("'{type_name}' is not a valid block type name"),
        ))
    }
}

fn require_string(source: &FragmentSource<'_>, attribute: &str) -> Result<(), AttributeError> {
    match source.attribute(attribute) {
        None | Some(Value::Null) => Err(AttributeError::missing(attribute)),
        Some(Value::String(value)) if value.trim().is_empty() => {
            Err(AttributeError::invalid(attribute, "must not be blank"))
        }
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(AttributeError::invalid(attribute, "must be a string")),
    }
}

fn optional_string(source: &FragmentSource<'_>, attribute: &str) -> Result<(), AttributeError> {
    match source.attribute(attribute) {
        None | Some(Value::Null | Value::String(_)) => Ok(()),
        Some(_) => Err(AttributeError::invalid(attribute, "must be a string")),
    }
}

/// Copies `attributes`, dropping `null` members at every depth.
fn strip_nulls(attributes: &Map<String, Value>) -> Map<String, Value> {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), strip_value(value)))
        .collect()
}

fn strip_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_nulls(map)),
        Value::Array(items) => Value::Array(items.iter().map(strip_value).collect()),
        other => other.clone(),
    }
}
