//! Lint for enum member values.

use std::collections::HashMap;

use thriftgen_ast::Program;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when two members of an enum share a value. This is
/// legal, but converting the value back to a name picks the first member.
pub struct EnumValueLint;

impl Lint for EnumValueLint {
    fn name(&self) -> &'static str {
        "enum-values"
    }

    fn description(&self) -> &'static str {
        "Warn about enum members sharing a value"
    }

    fn check(&self, program: &Program, diagnostics: &mut Vec<Diagnostic>) {
        for def in &program.enums {
            let mut seen: HashMap<i32, &str> = HashMap::new();
            for member in &def.values {
                if let Some(first) = seen.get(&member.value) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "'{}' has the same value ({}) as '{}'",
                                member.name, member.value, first
                            ),
                        )
                        .at(format!("{}.{}", def.name, member.name)),
                    );
                } else {
                    seen.insert(member.value, &member.name);
                }
            }
        }
    }
}
