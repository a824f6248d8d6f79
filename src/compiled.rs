//! Direction-indexed runtime representation of a [`MappingSpec`](crate::MappingSpec).
//!
//! Populated by [`compile`](crate::compiler::compile) and read by the executor.
//! Nothing mutates a `CompiledMapping` once compilation returns.

use crate::rule::TransformFn;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Which way a record is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source record to target record
    Forward,
    /// Target record back to source record
    Reverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Lookup tables for one direction. Every table is keyed by the field name as
/// it appears in that direction's input record.
#[derive(Default, Clone)]
pub(crate) struct DirectionTables {
    pub(crate) rename: IndexMap<String, String>,
    pub(crate) scalar: HashMap<String, TransformFn>,
    pub(crate) element: HashMap<String, TransformFn>,
    pub(crate) nested: HashMap<String, Arc<CompiledMapping>>,
}

/// Compiled form of a mapping. Nested levels are owned by their parent, and
/// the forward and reverse entries of one nested field point at the same child.
#[derive(Default, Clone)]
pub struct CompiledMapping {
    pub(crate) source_keys: Vec<String>,
    pub(crate) target_keys: Vec<String>,
    pub(crate) nested_target_keys: Vec<String>,
    pub(crate) forward: DirectionTables,
    pub(crate) reverse: DirectionTables,
}

impl CompiledMapping {
    pub(crate) fn tables(&self, direction: Direction) -> &DirectionTables {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }

    /// Source field names that participate in the mapping.
    pub fn source_keys(&self) -> &[String] {
        &self.source_keys
    }

    /// Target field names that participate in the mapping.
    pub fn target_keys(&self) -> &[String] {
        &self.target_keys
    }

    /// Target field names mapped through a nested object or object array rule.
    pub fn nested_target_keys(&self) -> &[String] {
        &self.nested_target_keys
    }

    /// Field renames for `direction`, input field to output field, in
    /// declaration order.
    pub fn rename_map(&self, direction: Direction) -> &IndexMap<String, String> {
        &self.tables(direction).rename
    }

    pub fn scalar_transform(&self, direction: Direction, key: &str) -> Option<&TransformFn> {
        self.tables(direction).scalar.get(key)
    }

    pub fn element_transform(&self, direction: Direction, key: &str) -> Option<&TransformFn> {
        self.tables(direction).element.get(key)
    }

    pub fn nested_mapping(&self, direction: Direction, key: &str) -> Option<&Arc<CompiledMapping>> {
        self.tables(direction).nested.get(key)
    }
}

impl fmt::Debug for CompiledMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nested: IndexMap<&String, &CompiledMapping> = self
            .forward
            .rename
            .keys()
            .filter_map(|key| self.forward.nested.get(key).map(|child| (key, child.as_ref())))
            .collect();

        f.debug_struct("CompiledMapping")
            .field("source_keys", &self.source_keys)
            .field("target_keys", &self.target_keys)
            .field("renames", &self.forward.rename)
            .field("nested", &nested)
            .finish_non_exhaustive()
    }
}
