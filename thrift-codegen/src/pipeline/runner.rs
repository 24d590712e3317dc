//! Pipeline orchestrator.

use eyre::Result;
use thriftgen_ast::Program;
use tracing::debug;

use super::{CompilationContext, Phase, phases::ValidatePhase};

/// The pipeline orchestrator.
///
/// Runs the built-in validate phase followed by any user phases.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().phase(MyCustomPhase);
/// let ctx = pipeline.run(program)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a new pipeline with the default lints.
    pub fn new() -> Self {
        Self::with_validate(ValidatePhase::new())
    }

    /// Create a pipeline with a custom validate phase.
    pub fn with_validate(validate: ValidatePhase) -> Self {
        Self {
            validate,
            phases: Vec::new(),
        }
    }

    /// Add a phase to run after validation.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Names of all phases in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        std::iter::once(self.validate.name())
            .chain(self.phases.iter().map(|p| p.name()))
            .collect()
    }

    /// Run the pipeline on a program.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, program: Program) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(program);

        let phases = std::iter::once(&self.validate as &dyn Phase)
            .chain(self.phases.iter().map(|p| p.as_ref()));
        for phase in phases {
            debug!(phase = phase.name(), "running phase");
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
