//! Named transform functions for declarative mappings.
//!
//! Mapping definitions refer to transforms by name; the registry resolves
//! those names to [`TransformFn`]s. `TransformRegistry::new()` comes with the
//! builtins below, and callers can register their own.
//!
//! | name | input | output |
//! |------|-------|--------|
//! | `identity` | any | same value |
//! | `to_uppercase`, `to_lowercase`, `trim` | string | string |
//! | `negate`, `increment`, `decrement` | number | number |
//! | `to_string` | string, number, boolean | string |
//! | `parse_number` | string, number | number |
//! | `parse_bool` | string, boolean | boolean |
//!
//! Every builtin except `identity` passes `null` through unchanged.

use crate::error::{value_kind, MapperError, MapperResult};
use crate::rule::TransformFn;
use log::warn;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name to transform function lookup.
#[derive(Clone)]
pub struct TransformRegistry {
    functions: HashMap<String, TransformFn>,
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self {
            functions: builtin_functions(),
        }
    }
}

impl TransformRegistry {
    /// Creates a registry holding the builtin transforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with no transforms at all.
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers `function` under `name`, replacing any existing entry.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.insert(name.clone(), Arc::new(function)).is_some() {
            warn!("Transform '{}' was already registered and has been replaced", name);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&TransformFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Looks up `name`, failing if it is not registered.
    ///
    /// # Errors
    /// Returns `MapperError::UnknownFunction` for unregistered names.
    pub fn resolve(&self, name: &str) -> MapperResult<TransformFn> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| MapperError::UnknownFunction(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// The builtin transforms, keyed by name.
pub fn builtin_functions() -> HashMap<String, TransformFn> {
    let mut functions = HashMap::new();

    functions.insert("identity".to_string(), transform(|v| Ok(v.clone())));
    functions.insert(
        "to_uppercase".to_string(),
        transform(|v| map_str("to_uppercase", v, str::to_uppercase)),
    );
    functions.insert(
        "to_lowercase".to_string(),
        transform(|v| map_str("to_lowercase", v, str::to_lowercase)),
    );
    functions.insert(
        "trim".to_string(),
        transform(|v| map_str("trim", v, |s| s.trim().to_string())),
    );
    functions.insert(
        "negate".to_string(),
        transform(|v| map_number("negate", v, i64::checked_neg, |f| -f)),
    );
    functions.insert(
        "increment".to_string(),
        transform(|v| map_number("increment", v, |i| i.checked_add(1), |f| f + 1.0)),
    );
    functions.insert(
        "decrement".to_string(),
        transform(|v| map_number("decrement", v, |i| i.checked_sub(1), |f| f - 1.0)),
    );
    functions.insert("to_string".to_string(), transform(to_string));
    functions.insert("parse_number".to_string(), transform(parse_number));
    functions.insert("parse_bool".to_string(), transform(parse_bool));

    functions
}

fn transform<F>(function: F) -> TransformFn
where
    F: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
{
    Arc::new(function)
}

fn unexpected(name: &str, expected: &str, value: &Value) -> MapperError {
    MapperError::Transform(format!(
        "{name} expects {expected}, got {}",
        value_kind(value)
    ))
}

fn map_str(name: &str, value: &Value, op: impl Fn(&str) -> String) -> MapperResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(op(s))),
        other => Err(unexpected(name, "a string", other)),
    }
}

fn map_number(
    name: &str,
    value: &Value,
    int_op: impl Fn(i64) -> Option<i64>,
    float_op: impl Fn(f64) -> f64,
) -> MapperResult<Value> {
    let n = match value {
        Value::Null => return Ok(Value::Null),
        Value::Number(n) => n,
        other => return Err(unexpected(name, "a number", other)),
    };

    if let Some(i) = n.as_i64() {
        return int_op(i)
            .map(Value::from)
            .ok_or_else(|| MapperError::Transform(format!("{name} overflowed on {i}")));
    }

    n.as_f64()
        .and_then(|f| Number::from_f64(float_op(f)))
        .map(Value::Number)
        .ok_or_else(|| MapperError::Transform(format!("{name} produced a non-finite number")))
}

fn to_string(value: &Value) -> MapperResult<Value> {
    match value {
        Value::Null | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(unexpected("to_string", "a scalar", other)),
    }
}

fn parse_number(value: &Value) -> MapperResult<Value> {
    match value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Value::from(i));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| MapperError::Transform(format!("parse_number cannot parse '{s}'")))
        }
        other => Err(unexpected("parse_number", "a string", other)),
    }
}

fn parse_bool(value: &Value) -> MapperResult<Value> {
    match value {
        Value::Null | Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(MapperError::Transform(format!("parse_bool cannot parse '{s}'"))),
        },
        other => Err(unexpected("parse_bool", "a string", other)),
    }
}
