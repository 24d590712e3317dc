//! Check operation - document validation.

use std::path::Path;

use thriftgen_ast::Program;
use thriftgen_codegen::pipeline::{CompilationContext, Phase, Severity, phases::ValidatePhase};
use tracing::debug;

use crate::reports::{CheckReport, ProgramStats};

/// Execute the check operation.
///
/// Runs the validation phase directly so every diagnostic is reported,
/// including the errors that would stop a generate run.
pub fn check(program: Program, input: &Path) -> CheckReport {
    let stats = ProgramStats::of(&program);
    let mut ctx = CompilationContext::new(program);
    if let Err(err) = ValidatePhase::new().run(&mut ctx) {
        debug!(error = %err, "validation failed");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        input: input.to_path_buf(),
        errors,
        warnings,
        infos,
        stats,
    }
}
