use crate::error::{MapperError, MapperResult};
use crate::mapping::MappingSpec;
use std::collections::HashMap;

/// Optional checks to run on a [`MappingSpec`] before compiling it.
///
/// The compiler itself accepts anything. The validator is for callers that
/// want ambiguous mappings rejected up front.
pub struct MappingValidator;

impl MappingValidator {
    /// Validates a mapping and every nested mapping inside it.
    ///
    /// # Errors
    /// Returns a `MapperError::InvalidMapping` if:
    /// - A field name is empty
    /// - A target key is empty
    /// - Two fields at the same level map to the same target key
    pub fn validate(spec: &MappingSpec) -> MapperResult<()> {
        Self::validate_level(spec, "")
    }

    fn validate_level(spec: &MappingSpec, path: &str) -> MapperResult<()> {
        let mut targets: HashMap<&str, &str> = HashMap::new();

        for (field, rule) in spec.iter() {
            if field.is_empty() {
                return Err(MapperError::InvalidMapping(format!(
                    "Field name cannot be empty{}",
                    location(path)
                )));
            }

            let target = rule.target_key();
            if target.is_empty() {
                return Err(MapperError::InvalidMapping(format!(
                    "Field {} has an empty target key",
                    qualified(path, field)
                )));
            }

            if let Some(previous) = targets.insert(target, field) {
                return Err(MapperError::InvalidMapping(format!(
                    "Fields {} and {} both map to target key '{target}'",
                    qualified(path, previous),
                    qualified(path, field)
                )));
            }

            if let Some(nested) = rule.nested() {
                Self::validate_level(nested, &qualified(path, field))?;
            }
        }

        Ok(())
    }
}

fn qualified(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" in {path}")
    }
}
