//! # Strict Mapper
//!
//! Declarative, bidirectional mapping between two record shapes. Per-field
//! rules are compiled once into direction-indexed lookup tables; the compiled
//! mapping is then used to map records forward (source to target) and back.
//!
//! ## Core Components
//!
//! * `rule` - The per-field rule kinds and transform function type
//! * `mapping` - `MappingSpec`, the ordered set of rules for one record level
//! * `compiler` - Turns a `MappingSpec` into a `CompiledMapping`
//! * `compiled` - The compiled, direction-indexed representation
//! * `executor` - Walks records against a compiled mapping
//! * `mapper` - `Mapper` and `TypedMapper`, the entry points
//! * `registry` - Named transform functions, including builtins
//! * `definition` - Serializable mapping definitions (JSON, TOML)
//! * `dsl` - Line-oriented text syntax for mapping definitions
//! * `validator` - Optional pre-compilation checks
//! * `error` - Error types and handling
//!
//! ## Semantics
//!
//! A field absent from the input is absent from the output. A `null` nested
//! object, object array or scalar array stays `null` without recursing. Fields
//! the mapping does not declare are ignored.
//!
//! ```
//! use serde_json::json;
//! use strict_mapper::{Mapper, MappingSpec, Rule};
//!
//! let friend = MappingSpec::new().with("age", Rule::property(
//!     "age",
//!     |v| Ok(json!(v.as_i64().unwrap_or(0) + 1)),
//!     |v| Ok(json!(v.as_i64().unwrap_or(0) - 1)),
//! ));
//! let mapper = Mapper::new(&MappingSpec::new()
//!     .with("name", "full_name")
//!     .with("friends", Rule::object_array("friends", friend)));
//!
//! let target = mapper.map(&json!({"name": "Jack", "friends": [{"age": 10}]})).unwrap();
//! assert_eq!(target, json!({"full_name": "Jack", "friends": [{"age": 11}]}));
//!
//! let source = mapper.map_reverse(&target).unwrap();
//! assert_eq!(source, json!({"name": "Jack", "friends": [{"age": 10}]}));
//! ```

pub mod compiled;
pub mod compiler;
pub mod definition;
pub mod dsl;
pub mod error;
pub mod executor;
pub mod mapper;
pub mod mapping;
pub mod registry;
pub mod rule;
pub mod validator;

// Re-export main types for convenience
pub use compiled::{CompiledMapping, Direction};
pub use compiler::compile;
pub use definition::{FieldDefinition, MappingDefinition, RuleDefinition};
pub use dsl::parse_mapping_dsl;
pub use error::{MapperError, MapperResult};
pub use mapper::{Mapper, TypedMapper};
pub use mapping::MappingSpec;
pub use registry::TransformRegistry;
pub use rule::{Rule, RuleKind, TransformFn};
pub use validator::MappingValidator;
