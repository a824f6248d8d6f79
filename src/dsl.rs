use crate::definition::{FieldDefinition, MappingDefinition, RuleDefinition};
use crate::error::{MapperError, MapperResult};

/// An `OBJECT`/`OBJECTS` line waiting for its closing brace.
struct OpenBlock {
    field: String,
    target: String,
    array: bool,
    line: usize,
}

struct Frame {
    definition: MappingDefinition,
    opened_by: Option<OpenBlock>,
}

/// Parse a mapping DSL string into a mapping definition
///
/// Syntax, one rule per line, keywords case-insensitive:
///
/// ```text
/// # Comment line
/// ALIAS name TO name2
/// PROPERTY age TO age WITH increment REVERSE decrement
/// ARRAY ids TO ids WITH negate REVERSE negate
/// OBJECT features TO features {
///     PROPERTY color TO color WITH to_uppercase REVERSE to_lowercase
/// }
/// OBJECTS friends TO friends {
///     ALIAS name TO name
/// }
/// ```
///
/// # Errors
///
/// Returns a `MapperError::InvalidDsl` if:
/// - A line does not match any rule syntax
/// - A closing brace has no matching block
/// - A block is never closed
pub fn parse_mapping_dsl(dsl: &str) -> MapperResult<MappingDefinition> {
    let mut stack = vec![Frame {
        definition: MappingDefinition::new(),
        opened_by: None,
    }];

    for (i, line) in dsl.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == "}" {
            close_block(&mut stack, line_no)?;
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let cmd = tokens[0].to_uppercase();
        match cmd.as_str() {
            "ALIAS" => {
                if tokens.len() != 4 || !keyword(tokens[2], "TO") {
                    return Err(invalid(line_no, "Expected: ALIAS source TO target"));
                }
                current(&mut stack)
                    .fields
                    .insert(tokens[1].to_string(), FieldDefinition::Alias(tokens[3].to_string()));
            }
            "PROPERTY" | "ARRAY" => {
                if tokens.len() != 8
                    || !keyword(tokens[2], "TO")
                    || !keyword(tokens[4], "WITH")
                    || !keyword(tokens[6], "REVERSE")
                {
                    return Err(invalid(
                        line_no,
                        &format!("Expected: {cmd} source TO target WITH function REVERSE function"),
                    ));
                }
                let target = tokens[3].to_string();
                let transform = tokens[5].to_string();
                let reverse = tokens[7].to_string();
                let rule = if cmd == "PROPERTY" {
                    RuleDefinition::Property {
                        target,
                        transform,
                        reverse,
                    }
                } else {
                    RuleDefinition::Array {
                        target,
                        transform,
                        reverse,
                    }
                };
                current(&mut stack)
                    .fields
                    .insert(tokens[1].to_string(), FieldDefinition::Rule(rule));
            }
            "OBJECT" | "OBJECTS" => {
                if tokens.len() != 5 || !keyword(tokens[2], "TO") || tokens[4] != "{" {
                    return Err(invalid(line_no, &format!("Expected: {cmd} source TO target {{")));
                }
                stack.push(Frame {
                    definition: MappingDefinition::new(),
                    opened_by: Some(OpenBlock {
                        field: tokens[1].to_string(),
                        target: tokens[3].to_string(),
                        array: cmd == "OBJECTS",
                        line: line_no,
                    }),
                });
            }
            _ => return Err(invalid(line_no, &format!("Unknown command '{}'", tokens[0]))),
        }
    }

    if let Some(block) = stack.last().and_then(|frame| frame.opened_by.as_ref()) {
        return Err(invalid(
            block.line,
            &format!("Block for '{}' is never closed", block.field),
        ));
    }

    Ok(stack.pop().map(|frame| frame.definition).unwrap_or_default())
}

fn close_block(stack: &mut Vec<Frame>, line_no: usize) -> MapperResult<()> {
    if stack.len() < 2 {
        return Err(invalid(line_no, "Unexpected '}'"));
    }

    let Some(Frame {
        definition,
        opened_by: Some(block),
    }) = stack.pop()
    else {
        return Err(invalid(line_no, "Unexpected '}'"));
    };

    let rule = if block.array {
        RuleDefinition::ObjectArray {
            target: block.target,
            mapping: definition,
        }
    } else {
        RuleDefinition::NestedObject {
            target: block.target,
            mapping: definition,
        }
    };

    current(stack)
        .fields
        .insert(block.field, FieldDefinition::Rule(rule));
    Ok(())
}

fn current(stack: &mut [Frame]) -> &mut MappingDefinition {
    // the root frame is never popped
    let last = stack.len() - 1;
    &mut stack[last].definition
}

fn keyword(token: &str, expected: &str) -> bool {
    token.eq_ignore_ascii_case(expected)
}

fn invalid(line_no: usize, message: &str) -> MapperError {
    MapperError::InvalidDsl(format!("{message} on line {line_no}"))
}
