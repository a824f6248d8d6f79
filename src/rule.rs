//! Per-field mapping rules.
//!
//! A [`Rule`] describes how one source field corresponds to one target field.
//! Rules are grouped into a [`MappingSpec`](crate::mapping::MappingSpec) and
//! compiled once into a [`CompiledMapping`](crate::compiled::CompiledMapping).

use crate::error::MapperResult;
use crate::mapping::MappingSpec;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A value transform. Shared between compiled mappings and safe to call from
/// any thread.
pub type TransformFn = Arc<dyn Fn(&Value) -> MapperResult<Value> + Send + Sync>;

/// Mapping rule for a single field.
#[derive(Clone)]
pub enum Rule {
    /// Rename only, value copied as is
    Alias(String),
    /// Rename plus a scalar transform pair
    Property {
        target_key: String,
        transform: TransformFn,
        reverse_transform: TransformFn,
    },
    /// Rename plus an elementwise transform pair
    ArrayOfScalars {
        target_key: String,
        element_transform: TransformFn,
        reverse_element_transform: TransformFn,
    },
    /// Rename plus a nested mapping applied to the object value
    NestedObject {
        target_key: String,
        nested: MappingSpec,
    },
    /// Rename plus a nested mapping applied to every array element
    ArrayOfObjects {
        target_key: String,
        nested: MappingSpec,
    },
}

/// The variant of a [`Rule`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Alias,
    Property,
    ArrayOfScalars,
    NestedObject,
    ArrayOfObjects,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alias => "alias",
            Self::Property => "property",
            Self::ArrayOfScalars => "array",
            Self::NestedObject => "nested_object",
            Self::ArrayOfObjects => "object_array",
        };
        f.write_str(name)
    }
}

impl Rule {
    /// Maps the field to `target_key` without touching its value.
    pub fn alias(target_key: impl Into<String>) -> Self {
        Self::Alias(target_key.into())
    }

    /// Maps the field to `target_key`, converting the value with `transform`
    /// and back with `reverse_transform`.
    pub fn property<F, R>(target_key: impl Into<String>, transform: F, reverse_transform: R) -> Self
    where
        F: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
        R: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
    {
        Self::Property {
            target_key: target_key.into(),
            transform: Arc::new(transform),
            reverse_transform: Arc::new(reverse_transform),
        }
    }

    /// Maps an array of scalars to `target_key`, converting each element.
    pub fn array<F, R>(
        target_key: impl Into<String>,
        element_transform: F,
        reverse_element_transform: R,
    ) -> Self
    where
        F: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
        R: Fn(&Value) -> MapperResult<Value> + Send + Sync + 'static,
    {
        Self::ArrayOfScalars {
            target_key: target_key.into(),
            element_transform: Arc::new(element_transform),
            reverse_element_transform: Arc::new(reverse_element_transform),
        }
    }

    /// Maps a nested object to `target_key` using its own mapping.
    pub fn nested_object(target_key: impl Into<String>, nested: MappingSpec) -> Self {
        Self::NestedObject {
            target_key: target_key.into(),
            nested,
        }
    }

    /// Maps an array of objects to `target_key`, applying `nested` to every element.
    pub fn object_array(target_key: impl Into<String>, nested: MappingSpec) -> Self {
        Self::ArrayOfObjects {
            target_key: target_key.into(),
            nested,
        }
    }

    /// Name of the field this rule writes on the target side.
    pub fn target_key(&self) -> &str {
        match self {
            Self::Alias(target_key)
            | Self::Property { target_key, .. }
            | Self::ArrayOfScalars { target_key, .. }
            | Self::NestedObject { target_key, .. }
            | Self::ArrayOfObjects { target_key, .. } => target_key,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Alias(_) => RuleKind::Alias,
            Self::Property { .. } => RuleKind::Property,
            Self::ArrayOfScalars { .. } => RuleKind::ArrayOfScalars,
            Self::NestedObject { .. } => RuleKind::NestedObject,
            Self::ArrayOfObjects { .. } => RuleKind::ArrayOfObjects,
        }
    }

    /// The nested mapping of object and object-array rules.
    pub fn nested(&self) -> Option<&MappingSpec> {
        match self {
            Self::NestedObject { nested, .. } | Self::ArrayOfObjects { nested, .. } => Some(nested),
            _ => None,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(target_key) => f.debug_tuple("Alias").field(target_key).finish(),
            Self::Property { target_key, .. } => f
                .debug_struct("Property")
                .field("target_key", target_key)
                .finish_non_exhaustive(),
            Self::ArrayOfScalars { target_key, .. } => f
                .debug_struct("ArrayOfScalars")
                .field("target_key", target_key)
                .finish_non_exhaustive(),
            Self::NestedObject { target_key, nested } => f
                .debug_struct("NestedObject")
                .field("target_key", target_key)
                .field("nested", nested)
                .finish(),
            Self::ArrayOfObjects { target_key, nested } => f
                .debug_struct("ArrayOfObjects")
                .field("target_key", target_key)
                .field("nested", nested)
                .finish(),
        }
    }
}

impl From<&str> for Rule {
    fn from(target_key: &str) -> Self {
        Self::Alias(target_key.to_string())
    }
}

impl From<String> for Rule {
    fn from(target_key: String) -> Self {
        Self::Alias(target_key)
    }
}
