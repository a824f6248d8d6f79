//! Compiles a [`MappingSpec`] into a [`CompiledMapping`].

use crate::compiled::{CompiledMapping, DirectionTables};
use crate::mapping::MappingSpec;
use crate::rule::Rule;
use log::{debug, warn};
use std::sync::Arc;

/// Compiles `spec`, recursing into nested object and object array rules.
///
/// Compilation never fails and does no validation. When two fields map to the
/// same target key the later one wins in the reverse direction; run
/// [`MappingValidator`](crate::validator::MappingValidator) first to reject that.
pub fn compile(spec: &MappingSpec) -> CompiledMapping {
    let mut compiled = CompiledMapping::default();

    for (field, rule) in spec.iter() {
        let target = rule.target_key();
        register_keys(&mut compiled, field, target);

        match rule {
            Rule::Alias(_) => {}
            Rule::Property {
                transform,
                reverse_transform,
                ..
            } => {
                compiled.forward.scalar.insert(field.to_string(), Arc::clone(transform));
                compiled
                    .reverse
                    .scalar
                    .insert(target.to_string(), Arc::clone(reverse_transform));
            }
            Rule::ArrayOfScalars {
                element_transform,
                reverse_element_transform,
                ..
            } => {
                compiled
                    .forward
                    .element
                    .insert(field.to_string(), Arc::clone(element_transform));
                compiled
                    .reverse
                    .element
                    .insert(target.to_string(), Arc::clone(reverse_element_transform));
            }
            Rule::NestedObject { nested, .. } | Rule::ArrayOfObjects { nested, .. } => {
                debug!("Compiling nested {} mapping for '{}' -> '{}'", rule.kind(), field, target);

                let child = Arc::new(compile(nested));
                compiled.forward.nested.insert(field.to_string(), Arc::clone(&child));
                compiled.reverse.nested.insert(target.to_string(), child);
                push_unique(&mut compiled.nested_target_keys, target);
            }
        }
    }

    debug!(
        "Compiled mapping with {} fields ({} nested)",
        compiled.forward.rename.len(),
        compiled.forward.nested.len()
    );

    compiled
}

fn register_keys(compiled: &mut CompiledMapping, field: &str, target: &str) {
    compiled.forward.rename.insert(field.to_string(), target.to_string());

    if let Some(previous) = rename_reverse(&mut compiled.reverse, target, field) {
        warn!(
            "Target key '{}' is mapped from both '{}' and '{}'; '{}' wins when mapping in reverse",
            target, previous, field, field
        );
    }

    push_unique(&mut compiled.target_keys, target);
    push_unique(&mut compiled.source_keys, field);
}

/// Records the reverse rename, returning the source field it displaced.
fn rename_reverse(tables: &mut DirectionTables, target: &str, field: &str) -> Option<String> {
    tables
        .rename
        .insert(target.to_string(), field.to_string())
        .filter(|previous| previous != field)
}

fn push_unique(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|existing| existing == key) {
        keys.push(key.to_string());
    }
}
