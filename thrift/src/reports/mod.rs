//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod generators;
mod output;

pub use check::{CheckReport, ProgramStats};
pub use generate::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};
pub use generators::{BackendInfo, GeneratorsReport};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Output, Report, TerminalOutput};
