use crate::compiled::{CompiledMapping, Direction};
use crate::compiler::compile;
use crate::definition::MappingDefinition;
use crate::error::MapperResult;
use crate::executor::apply;
use crate::mapping::MappingSpec;
use crate::registry::TransformRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Maps records between a source shape and a target shape, in both directions.
///
/// The mapping is compiled once on construction. A `Mapper` is read-only
/// afterwards and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Mapper {
    compiled: CompiledMapping,
}

impl Mapper {
    /// Compiles `spec` into a new mapper.
    pub fn new(spec: &MappingSpec) -> Self {
        Self {
            compiled: compile(spec),
        }
    }

    /// Resolves a declarative definition against `registry` and compiles it.
    ///
    /// # Errors
    /// Returns a `MapperError::UnknownFunction` if the definition names a
    /// transform the registry does not contain.
    pub fn from_definition(
        definition: &MappingDefinition,
        registry: &TransformRegistry,
    ) -> MapperResult<Self> {
        let spec = definition.resolve(registry)?;
        Ok(Self::new(&spec))
    }

    /// Maps a source record to a target record.
    ///
    /// # Errors
    /// Returns an error if a record position holds a non-object where the
    /// mapping expects one, or if any transform fails.
    pub fn map(&self, input: &Value) -> MapperResult<Value> {
        apply(input, &self.compiled, Direction::Forward)
    }

    /// Maps a target record back to a source record.
    ///
    /// # Errors
    /// Same conditions as [`Mapper::map`].
    pub fn map_reverse(&self, input: &Value) -> MapperResult<Value> {
        apply(input, &self.compiled, Direction::Reverse)
    }

    /// Gets the compiled mapping.
    pub fn compiled_mapping(&self) -> &CompiledMapping {
        &self.compiled
    }
}

impl From<CompiledMapping> for Mapper {
    fn from(compiled: CompiledMapping) -> Self {
        Self { compiled }
    }
}

/// A [`Mapper`] between two serde types.
///
/// Values go through `serde_json::Value`, so optional fields should use
/// `#[serde(skip_serializing_if = "Option::is_none")]` when absence, rather
/// than `null`, is meant.
pub struct TypedMapper<S, T> {
    mapper: Mapper,
    _shapes: PhantomData<fn(S) -> T>,
}

impl<S, T> TypedMapper<S, T>
where
    S: Serialize + DeserializeOwned,
    T: Serialize + DeserializeOwned,
{
    pub fn new(spec: &MappingSpec) -> Self {
        Self {
            mapper: Mapper::new(spec),
            _shapes: PhantomData,
        }
    }

    /// Maps a source value into the target type.
    ///
    /// # Errors
    /// Returns a `MapperError::Json` if either side fails to (de)serialize,
    /// or any error from [`Mapper::map`].
    pub fn map(&self, input: &S) -> MapperResult<T> {
        let value = serde_json::to_value(input)?;
        let mapped = self.mapper.map(&value)?;
        Ok(serde_json::from_value(mapped)?)
    }

    /// Maps a target value back into the source type.
    ///
    /// # Errors
    /// Same conditions as [`TypedMapper::map`].
    pub fn map_reverse(&self, input: &T) -> MapperResult<S> {
        let value = serde_json::to_value(input)?;
        let mapped = self.mapper.map_reverse(&value)?;
        Ok(serde_json::from_value(mapped)?)
    }

    /// The untyped mapper underneath.
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }
}

impl<S, T> fmt::Debug for TypedMapper<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedMapper")
            .field("mapper", &self.mapper)
            .finish()
    }
}
