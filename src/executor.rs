//! Walks a record against a [`CompiledMapping`].
//!
//! Absent fields are skipped and never show up in the output. `null` stops
//! recursion for nested mappings and element transforms, but scalar
//! transforms receive it like any other value. Array-ness is checked on the
//! live value, not taken from the rule kind.

use crate::compiled::{CompiledMapping, Direction};
use crate::error::{value_kind, MapperError, MapperResult};
use crate::rule::TransformFn;
use serde_json::{Map, Value};

/// Maps one record in `direction`.
pub fn apply(input: &Value, mapping: &CompiledMapping, direction: Direction) -> MapperResult<Value> {
    let record = input.as_object().ok_or(MapperError::NotAnObject {
        found: value_kind(input),
    })?;

    let renames = mapping.rename_map(direction);
    let mut output = Map::with_capacity(renames.len());

    for (from_key, to_key) in renames {
        let Some(value) = record.get(from_key) else {
            continue;
        };

        let transformed = transform_value(from_key, value, mapping, direction)?;
        output.insert(to_key.clone(), transformed);
    }

    Ok(Value::Object(output))
}

fn transform_value(
    key: &str,
    value: &Value,
    mapping: &CompiledMapping,
    direction: Direction,
) -> MapperResult<Value> {
    if let Some(nested) = mapping.nested_mapping(direction, key) {
        return match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| apply(item, nested, direction))
                .collect::<MapperResult<Vec<_>>>()
                .map(Value::Array),
            _ => apply(value, nested, direction),
        };
    }

    if let Some(element_transform) = mapping.element_transform(direction, key) {
        return match value {
            Value::Null => Ok(Value::Null),
            _ => map_elements(value, element_transform),
        };
    }

    match mapping.scalar_transform(direction, key) {
        Some(transform) => map_elements(value, transform),
        None => Ok(value.clone()),
    }
}

/// Applies `transform` to every element of an array, or to the value itself.
fn map_elements(value: &Value, transform: &TransformFn) -> MapperResult<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| transform(item))
            .collect::<MapperResult<Vec<_>>>()
            .map(Value::Array),
        _ => transform(value),
    }
}
