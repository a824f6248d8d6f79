//! Error types for mapping compilation, execution and definition loading.
//!
//! Transform functions return [`MapperError`] themselves, so an error raised
//! inside a transform reaches the caller of `map`/`map_reverse` untouched.

use thiserror::Error;

/// Result type used throughout the crate.
pub type MapperResult<T> = Result<T, MapperError>;

/// Unified error type for the mapper.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A value transform rejected its input
    #[error("Transform failed: {0}")]
    Transform(String),

    /// A record position held something other than an object
    #[error("Expected an object, found {found}")]
    NotAnObject { found: &'static str },

    /// A definition referenced a transform name the registry does not know
    #[error("Transform function not found: {0}")]
    UnknownFunction(String),

    /// Mapping DSL syntax error
    #[error("Invalid DSL: {0}")]
    InvalidDsl(String),

    /// Mapping rejected by the validator
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// JSON parsing or (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO-related errors (definition files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapperError {
    /// Creates a transform error from any displayable message.
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform(message.into())
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
