//! Lint for field key assignment.

use std::collections::HashMap;

use thriftgen_ast::{Field, Program};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on duplicate field keys and warns about negative
/// (implicitly assigned) ones, in structs and in function argument and
/// exception lists.
pub struct FieldKeyLint;

impl Lint for FieldKeyLint {
    fn name(&self) -> &'static str {
        "field-keys"
    }

    fn description(&self) -> &'static str {
        "Field keys must be unique and should be explicit"
    }

    fn check(&self, program: &Program, diagnostics: &mut Vec<Diagnostic>) {
        for def in &program.structs {
            check_fields(&def.name, &def.fields, diagnostics);
        }
        for service in &program.services {
            for function in &service.functions {
                let path = format!("{}.{}", service.name, function.name);
                check_fields(&path, &function.arguments, diagnostics);
                check_fields(&format!("{}.throws", path), &function.exceptions, diagnostics);
            }
        }
    }
}

fn check_fields(owner: &str, fields: &[Field], diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<i16, &str> = HashMap::new();

    for field in fields {
        let location = format!("{}.{}", owner, field.name);
        if let Some(first) = seen.insert(field.key, &field.name) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!(
                        "field key {} of '{}' is already used by '{}'",
                        field.key, field.name, first
                    ),
                )
                .at(&location),
            );
        }
        if field.key < 0 {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("field '{}' has no explicit key", field.name),
                )
                .at(&location),
            );
        }
    }
}
