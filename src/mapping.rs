//! The declarative mapping: field name to [`Rule`].

use crate::rule::Rule;
use indexmap::IndexMap;

/// Per-field rules describing how a source record maps onto a target record.
///
/// Field order is insertion order and is the order in which mapped fields
/// appear in the output.
///
/// # Example
/// ```
/// use serde_json::json;
/// use strict_mapper::{MappingSpec, Rule};
///
/// let spec = MappingSpec::new()
///     .with("name", "full_name")
///     .with("age", Rule::property(
///         "age",
///         |v| Ok(json!(v.as_i64().unwrap_or(0) + 1)),
///         |v| Ok(json!(v.as_i64().unwrap_or(0) - 1)),
///     ));
///
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.get("name").map(|r| r.target_key()), Some("full_name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingSpec {
    rules: IndexMap<String, Rule>,
}

impl MappingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for `field` and returns the mapping, for chaining.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(field, rule);
        self
    }

    /// Sets the rule for `field`, returning the rule it replaced.
    pub fn insert(&mut self, field: impl Into<String>, rule: impl Into<Rule>) -> Option<Rule> {
        self.rules.insert(field.into(), rule.into())
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }

    /// Declared source field names, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K, R> FromIterator<(K, R)> for MappingSpec
where
    K: Into<String>,
    R: Into<Rule>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (field, rule) in iter {
            spec.insert(field, rule);
        }
        spec
    }
}

impl<'a> IntoIterator for &'a MappingSpec {
    type Item = (&'a String, &'a Rule);
    type IntoIter = indexmap::map::Iter<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
