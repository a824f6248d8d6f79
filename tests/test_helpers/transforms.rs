use serde_json::{json, Value};
use strict_mapper::{MapperError, MapperResult};

pub fn int(value: &Value) -> MapperResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| MapperError::transform(format!("expected an integer, got {value}")))
}

pub fn text(value: &Value) -> MapperResult<&str> {
    value
        .as_str()
        .ok_or_else(|| MapperError::transform(format!("expected a string, got {value}")))
}

pub fn add(delta: i64) -> impl Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static {
    move |value| Ok(json!(int(value)? + delta))
}

pub fn negate(value: &Value) -> MapperResult<Value> {
    Ok(json!(-int(value)?))
}

pub fn append(suffix: &'static str) -> impl Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static {
    move |value| Ok(json!(format!("{}{suffix}", text(value)?)))
}

pub fn strip(suffix: &'static str) -> impl Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static {
    move |value| Ok(json!(text(value)?.replacen(suffix, "", 1)))
}
