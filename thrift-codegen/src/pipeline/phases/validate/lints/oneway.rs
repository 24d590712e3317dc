//! Lint for oneway function signatures.

use thriftgen_ast::Program;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on oneway functions that return a value or declare
/// exceptions. No reply is ever sent for them.
pub struct OnewayLint;

impl Lint for OnewayLint {
    fn name(&self) -> &'static str {
        "oneway"
    }

    fn description(&self) -> &'static str {
        "Oneway functions must return void and declare no exceptions"
    }

    fn check(&self, program: &Program, diagnostics: &mut Vec<Diagnostic>) {
        for service in &program.services {
            for function in service.functions.iter().filter(|f| f.oneway) {
                let location = format!("{}.{}", service.name, function.name);
                if !function.returns.is_void() {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "oneway function '{}' must return void, not '{}'",
                                function.name, function.returns
                            ),
                        )
                        .at(&location),
                    );
                }
                if !function.exceptions.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!("oneway function '{}' cannot throw", function.name),
                        )
                        .at(&location),
                    );
                }
            }
        }
    }
}
