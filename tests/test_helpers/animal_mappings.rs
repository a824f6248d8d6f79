//! Animal fixtures shared by the mapper tests.

use super::transforms::{add, append, int, negate, strip};
use serde_json::{json, Value};
use strict_mapper::{MappingSpec, Rule};

pub fn additional_mapping() -> MappingSpec {
    MappingSpec::new()
        .with("serialNumber", Rule::property("serialNumber", append("_new"), strip("_new")))
        .with("index", "index")
}

pub fn friend_mapping() -> MappingSpec {
    MappingSpec::new()
        .with("name", "name")
        .with("age", Rule::property("age", add(1), add(-1)))
}

pub fn features_mapping() -> MappingSpec {
    MappingSpec::new()
        .with("color", Rule::property("color", append("_changed"), strip("_changed")))
        .with(
            "level",
            Rule::property("level", add(3), |v| {
                let level = if v.is_null() { 0 } else { int(v)? };
                Ok(json!(level - 3))
            }),
        )
        .with("additional", Rule::nested_object("additional", additional_mapping()))
}

fn name_or_default(value: &Value, convert: fn(&str) -> String) -> Value {
    value
        .as_str()
        .map_or_else(|| json!("default"), |name| json!(convert(name)))
}

fn or_zero(value: &Value) -> strict_mapper::MapperResult<Value> {
    Ok(if value.is_null() { json!(0) } else { value.clone() })
}

pub fn complex_mapping() -> MappingSpec {
    MappingSpec::new()
        .with("name", "name2")
        .with("name2", "name3")
        .with("name3", "name")
        .with(
            "nameNullable",
            Rule::property(
                "nameNullable",
                |v| Ok(name_or_default(v, str::to_uppercase)),
                |v| Ok(name_or_default(v, str::to_lowercase)),
            ),
        )
        .with("age", Rule::property("age", add(1), add(-1)))
        .with("ageNullable", Rule::property("age_nullable", or_zero, or_zero))
        .with("friendIDs", "friendIDs")
        .with("friendIDsNullable", Rule::array("friendIDsNullable", negate, negate))
        .with("friends", Rule::object_array("friends", friend_mapping()))
        .with("friendsNullable", Rule::object_array("friends_nullable", friend_mapping()))
        .with("features", Rule::nested_object("features", features_mapping()))
        .with("featuresNullable", Rule::nested_object("features_nullable", features_mapping()))
}

/// Maps only a subset of the animal's fields.
pub fn partial_mapping() -> MappingSpec {
    MappingSpec::new()
        .with("name", "name2")
        .with("name2", "name3")
        .with("name3", "name")
        .with("age", Rule::property("age", add(1), add(-1)))
        .with("nameNullable", "nameNullable")
}

pub fn animal() -> Value {
    json!({
        "name": "Jack",
        "name2": "Dawson",
        "name3": "Great",
        "age": 20,
        "friendIDs": [1, 2, 3],
        "friendIDsNullable": [1, 2, 3],
        "friends": [{ "name": "Rose", "age": 10 }],
        "features": {
            "color": "blond",
            "level": 100,
            "additional": { "serialNumber": "s-03" }
        }
    })
}
