//! Validation pipeline run before code generation.
//!
//! The [`Pipeline`] runs a sequence of [`Phase`]s over a
//! [`CompilationContext`] that owns the loaded program. Phases collect
//! [`Diagnostic`]s; error diagnostics stop the run, warnings are kept for
//! the caller to report.
//!
//! # Example
//!
//! ```ignore
//! use thriftgen_codegen::pipeline::{Pipeline, Severity};
//!
//! let ctx = Pipeline::new().run(program)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//!
//! let generator = GoGenerator::new(&ctx.program, &options)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
