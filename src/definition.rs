//! Serializable mapping definitions.
//!
//! A [`MappingDefinition`] is the data form of a [`MappingSpec`]: transforms
//! are named instead of being closures, and get resolved against a
//! [`TransformRegistry`]. Definitions can be loaded from JSON, TOML or the
//! mapping DSL.
//!
//! ```json
//! {
//!   "name": "full_name",
//!   "age": { "rule": "property", "target": "age", "transform": "increment", "reverse": "decrement" },
//!   "features": { "rule": "nested_object", "target": "features", "mapping": { "color": "colour" } }
//! }
//! ```

use crate::dsl::parse_mapping_dsl;
use crate::error::{MapperError, MapperResult};
use crate::mapping::MappingSpec;
use crate::registry::TransformRegistry;
use crate::rule::Rule;
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field name to field definition, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingDefinition {
    pub fields: IndexMap<String, FieldDefinition>,
}

/// A bare string is an alias; anything else is a tagged rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDefinition {
    Alias(String),
    Rule(RuleDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleDefinition {
    Property {
        target: String,
        transform: String,
        reverse: String,
    },
    Array {
        target: String,
        transform: String,
        reverse: String,
    },
    NestedObject {
        target: String,
        mapping: MappingDefinition,
    },
    ObjectArray {
        target: String,
        mapping: MappingDefinition,
    },
}

impl MappingDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field definition and returns the definition, for chaining.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(field.into(), definition);
        self
    }

    /// Parses a JSON definition.
    ///
    /// # Errors
    /// Returns `MapperError::Json` if the document is not a valid definition.
    pub fn from_json_str(json: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a TOML definition.
    ///
    /// # Errors
    /// Returns `MapperError::Toml` if the document is not a valid definition.
    pub fn from_toml_str(toml_str: &str) -> MapperResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads a definition file. `.json` and `.toml` files are parsed as such,
    /// `.map` files as the mapping DSL.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The extension is not one of the supported formats
    /// - The contents do not parse
    pub fn from_file(path: impl AsRef<Path>) -> MapperResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let definition = match extension.as_deref() {
            Some("json") => Self::from_json_str(&contents)?,
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("map") => parse_mapping_dsl(&contents)?,
            _ => {
                return Err(MapperError::InvalidMapping(format!(
                    "Unsupported mapping file format: {}",
                    path.display()
                )))
            }
        };

        info!(
            "Loaded mapping definition with {} fields from {}",
            definition.fields.len(),
            path.display()
        );
        Ok(definition)
    }

    /// Serializes the definition as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `MapperError::Json` if serialization fails.
    pub fn to_json_string(&self) -> MapperResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Turns the definition into a [`MappingSpec`], looking transforms up in
    /// `registry`.
    ///
    /// # Errors
    /// Returns `MapperError::UnknownFunction` for the first transform name the
    /// registry does not contain.
    pub fn resolve(&self, registry: &TransformRegistry) -> MapperResult<MappingSpec> {
        let mut spec = MappingSpec::new();

        for (field, definition) in &self.fields {
            let rule = match definition {
                FieldDefinition::Alias(target) => Rule::alias(target.as_str()),
                FieldDefinition::Rule(rule) => rule.resolve(registry)?,
            };
            spec.insert(field.as_str(), rule);
        }

        Ok(spec)
    }
}

impl RuleDefinition {
    pub fn target(&self) -> &str {
        match self {
            Self::Property { target, .. }
            | Self::Array { target, .. }
            | Self::NestedObject { target, .. }
            | Self::ObjectArray { target, .. } => target,
        }
    }

    fn resolve(&self, registry: &TransformRegistry) -> MapperResult<Rule> {
        let rule = match self {
            Self::Property {
                target,
                transform,
                reverse,
            } => Rule::Property {
                target_key: target.clone(),
                transform: registry.resolve(transform)?,
                reverse_transform: registry.resolve(reverse)?,
            },
            Self::Array {
                target,
                transform,
                reverse,
            } => Rule::ArrayOfScalars {
                target_key: target.clone(),
                element_transform: registry.resolve(transform)?,
                reverse_element_transform: registry.resolve(reverse)?,
            },
            Self::NestedObject { target, mapping } => {
                Rule::nested_object(target.as_str(), mapping.resolve(registry)?)
            }
            Self::ObjectArray { target, mapping } => {
                Rule::object_array(target.as_str(), mapping.resolve(registry)?)
            }
        };
        Ok(rule)
    }
}

impl From<&str> for FieldDefinition {
    fn from(target: &str) -> Self {
        Self::Alias(target.to_string())
    }
}

impl From<RuleDefinition> for FieldDefinition {
    fn from(rule: RuleDefinition) -> Self {
        Self::Rule(rule)
    }
}
