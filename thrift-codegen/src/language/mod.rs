//! Language-specific abstractions.
//!
//! This module provides traits and types for language-specific code generation:
//! - [`LanguageCodegen`] - Main trait for backend generators
//! - [`TypeMapper`] - Trait for rendering Thrift types in the target language
//! - [`NamingConvention`] - Language-specific identifier rules
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod naming;
mod traits;

pub use naming::{NamingConvention, escape_with_suffix, preserve};
pub use traits::{
    GenerateResult, LanguageCodegen, NamedKind, PreviewFile, TypeMapper, write_files,
};
