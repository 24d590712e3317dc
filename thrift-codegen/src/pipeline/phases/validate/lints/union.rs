//! Lint for union definitions.

use thriftgen_ast::Program;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on required union fields. At most one union field is
/// set, so a required one could never be satisfied alongside another.
pub struct UnionLint;

impl Lint for UnionLint {
    fn name(&self) -> &'static str {
        "union"
    }

    fn description(&self) -> &'static str {
        "Union fields cannot be required"
    }

    fn check(&self, program: &Program, diagnostics: &mut Vec<Diagnostic>) {
        for def in program.structs.iter().filter(|s| s.is_union) {
            for field in def.fields.iter().filter(|f| f.requiredness.is_required()) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("union '{}' cannot have required field '{}'", def.name, field.name),
                    )
                    .at(format!("{}.{}", def.name, field.name)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::{Field, Struct, Type};

    use super::*;

    #[test]
    fn test_required_union_field() {
        let mut program = Program::new("tutorial");
        program.structs.push(
            Struct::union("Value")
                .field(Field::new(1, "i", Type::I64).required())
                .field(Field::new(2, "s", Type::string())),
        );

        let mut diagnostics = Vec::new();
        UnionLint.check(&program, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("Value.i"));
    }

    #[test]
    fn test_required_struct_field_is_fine() {
        let mut program = Program::new("tutorial");
        program
            .structs
            .push(Struct::new("Point").field(Field::new(1, "x", Type::I32).required()));

        let mut diagnostics = Vec::new();
        UnionLint.check(&program, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
