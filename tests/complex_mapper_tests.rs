use serde_json::json;
use strict_mapper::{Mapper, MappingSpec, Rule};

#[path = "test_helpers/mod.rs"]
mod test_helpers;

use test_helpers::animal_mappings::{animal, complex_mapping, features_mapping, friend_mapping};
use test_helpers::transforms::{add, append, strip};
use test_helpers::{field, init_logging};

fn features_mapper() -> Mapper {
    Mapper::new(&features_mapping())
}

fn complex_mapper() -> Mapper {
    init_logging();
    Mapper::new(&complex_mapping())
}

#[test]
fn test_map_features() {
    let target = features_mapper()
        .map(&json!({
            "color": "blond",
            "level": 100,
            "additional": { "serialNumber": "s-03", "index": 5 }
        }))
        .unwrap();

    assert_eq!(
        target,
        json!({
            "color": "blond_changed",
            "level": 103,
            "additional": { "serialNumber": "s-03_new", "index": 5 }
        })
    );
}

#[test]
fn test_map_features_with_absent_properties() {
    let target = features_mapper().map(&json!({ "color": "blond" })).unwrap();

    assert_eq!(target, json!({ "color": "blond_changed" }));
}

#[test]
fn test_map_reverse_features() {
    let source = features_mapper()
        .map_reverse(&json!({
            "color": "blond_changed",
            "level": 103,
            "additional": { "serialNumber": "s-03_new", "index": 5 }
        }))
        .unwrap();

    assert_eq!(
        source,
        json!({
            "color": "blond",
            "level": 100,
            "additional": { "serialNumber": "s-03", "index": 5 }
        })
    );
}

#[test]
fn test_map_reverse_features_with_null_level() {
    let source = features_mapper()
        .map_reverse(&json!({ "color": "blond_changed", "level": null }))
        .unwrap();

    assert_eq!(source, json!({ "color": "blond", "level": -3 }));
}

#[test]
fn test_map_animal() {
    let target = complex_mapper().map(&animal()).unwrap();

    assert_eq!(field(&target, "name2"), Some(&json!("Jack")));
    assert_eq!(field(&target, "name3"), Some(&json!("Dawson")));
    assert_eq!(field(&target, "name"), Some(&json!("Great")));
    assert_eq!(field(&target, "age"), Some(&json!(21)));
    assert_eq!(field(&target, "friendIDs"), Some(&json!([1, 2, 3])));
    assert_eq!(field(&target, "friendIDsNullable"), Some(&json!([-1, -2, -3])));
    assert_eq!(field(&target, "friends.0"), Some(&json!({ "name": "Rose", "age": 11 })));
    assert_eq!(field(&target, "features.color"), Some(&json!("blond_changed")));
    assert_eq!(field(&target, "features.level"), Some(&json!(103)));
    assert_eq!(field(&target, "features.additional.serialNumber"), Some(&json!("s-03_new")));
    assert!(field(&target, "features.additional.index").is_none());
    assert!(field(&target, "nameNullable").is_none());
    assert!(field(&target, "age_nullable").is_none());
    assert!(field(&target, "friends_nullable").is_none());
    assert!(field(&target, "features_nullable").is_none());
}

#[test]
fn test_map_animal_with_nulled_properties() {
    let target = complex_mapper()
        .map(&json!({
            "name": "Dawson",
            "nameNullable": null,
            "name2": "Jack",
            "name3": "Great",
            "age": 21,
            "ageNullable": null,
            "friendIDs": [1, 2, 3],
            "friendIDsNullable": null,
            "friends": [{ "name": "Rose", "age": 10 }],
            "friendsNullable": null,
            "features": null,
            "featuresNullable": null
        }))
        .unwrap();

    assert_eq!(target["nameNullable"], json!("default"));
    assert_eq!(target["age_nullable"], json!(0));
    assert_eq!(target["friendIDsNullable"], json!(null));
    assert_eq!(target["friends_nullable"], json!(null));
    assert_eq!(target["features"], json!(null));
    assert_eq!(target["features_nullable"], json!(null));
}

#[test]
fn test_map_reverse_animal() {
    let source = complex_mapper()
        .map_reverse(&json!({
            "name": "Great",
            "name2": "Jack",
            "name3": "Dawson",
            "age": 21,
            "friendIDs": [1, 2, 3],
            "friendIDsNullable": [-1, -2, -3],
            "friends": [{ "name": "Rose", "age": 10 }],
            "friends_nullable": [{ "name": "Rose", "age": 10 }],
            "features": {
                "color": "blond_changed",
                "level": 100,
                "additional": { "serialNumber": "s-03_new" }
            },
            "features_nullable": {
                "color": "blond_changed",
                "level": 100,
                "additional": { "serialNumber": "s-03_new" }
            }
        }))
        .unwrap();

    assert_eq!(source["name"], json!("Jack"));
    assert_eq!(source["name2"], json!("Dawson"));
    assert_eq!(source["name3"], json!("Great"));
    assert_eq!(source["age"], json!(20));
    assert_eq!(source["friendIDsNullable"], json!([1, 2, 3]));
    assert_eq!(source["friends"][0], json!({ "name": "Rose", "age": 9 }));
    assert_eq!(source["friendsNullable"][0], json!({ "name": "Rose", "age": 9 }));
    assert_eq!(source["features"]["color"], json!("blond"));
    assert_eq!(source["features"]["level"], json!(97));
    assert_eq!(source["features"]["additional"]["serialNumber"], json!("s-03"));
    assert_eq!(source["featuresNullable"]["additional"]["serialNumber"], json!("s-03"));
}

#[test]
fn test_map_animal_and_reverse() {
    let mapper = complex_mapper();
    let source = animal();

    let target = mapper.map(&source).unwrap();
    let remapped = mapper.map_reverse(&target).unwrap();

    assert_eq!(remapped, source);
}

#[test]
fn test_nested_null_does_not_invoke_transforms() {
    let nested = MappingSpec::new().with(
        "color",
        Rule::property(
            "color",
            |_| panic!("nested transform must not run for a null parent"),
            strip("_changed"),
        ),
    );
    let mapper = Mapper::new(&MappingSpec::new().with("features", Rule::nested_object("features", nested)));

    assert_eq!(mapper.map(&json!({ "features": null })).unwrap(), json!({ "features": null }));
}

#[test]
fn test_features_null_scenario() {
    let nested = MappingSpec::new().with("color", Rule::property("color", append("_changed"), strip("_changed")));
    let mapper = Mapper::new(&MappingSpec::new().with("features", Rule::nested_object("features", nested)));

    assert_eq!(mapper.map(&json!({ "features": null })).unwrap(), json!({ "features": null }));
}

#[test]
fn test_array_of_objects_scenario() {
    let nested = MappingSpec::new().with("age", Rule::property("age", add(1), add(-1)));
    let mapper = Mapper::new(&MappingSpec::new().with("friends", Rule::object_array("friends", nested)));

    assert_eq!(
        mapper.map(&json!({ "friends": [{ "age": 10 }] })).unwrap(),
        json!({ "friends": [{ "age": 11 }] })
    );
    assert_eq!(mapper.map(&json!({ "friends": [] })).unwrap(), json!({ "friends": [] }));
}

#[test]
fn test_object_array_rule_accepts_single_object() {
    let mapper = Mapper::new(&MappingSpec::new().with("friends", Rule::object_array("pals", friend_mapping())));

    let target = mapper.map(&json!({ "friends": { "name": "Rose", "age": 10 } })).unwrap();
    assert_eq!(target, json!({ "pals": { "name": "Rose", "age": 11 } }));
}

#[test]
fn test_error_inside_array_element_aborts_mapping() {
    let mapper = complex_mapper();
    let mut source = animal();
    source["friends"] = json!([{ "name": "Rose", "age": 10 }, { "name": "Cal", "age": "old" }]);

    assert!(mapper.map(&source).is_err());
}

#[test]
fn test_compiled_keys() {
    let compiled_mapper = complex_mapper();
    let compiled = compiled_mapper.compiled_mapping();

    for key in [
        "nameNullable",
        "name2",
        "name3",
        "age",
        "age_nullable",
        "friendIDsNullable",
        "friends",
        "friends_nullable",
        "features",
        "features_nullable",
    ] {
        assert!(compiled.target_keys().iter().any(|k| k == key), "missing target key {key}");
    }

    assert!(compiled.source_keys().iter().any(|k| k == "ageNullable"));
    assert!(!compiled.source_keys().iter().any(|k| k == "age_nullable"));
    assert_eq!(
        compiled.nested_target_keys(),
        ["friends", "friends_nullable", "features", "features_nullable"]
    );
}
