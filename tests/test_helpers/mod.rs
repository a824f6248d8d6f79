pub mod animal_mappings;
pub mod transforms;

use serde_json::Value;

/// Initializes test logging; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fetches a nested field by dotted path, e.g. `features.additional.index`.
pub fn field<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| match current {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => current.get(key),
    })
}
