//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the program and collects diagnostics

mod validate;

pub use validate::{
    EnumValueLint, FieldKeyLint, Lint, LintInfo, OnewayLint, UnionLint, ValidatePhase,
};
