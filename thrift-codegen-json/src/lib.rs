//! JSON description generator for thriftgen.
//!
//! Writes `<program>.json`: the program's namespaces, includes, typedefs,
//! enums, constants, structs and services as plain data. Constants are
//! evaluated, so enum references become integers and struct literals
//! become objects.
//!
//! # Options
//!
//! - `merge_includes` - embed included programs as nested documents

mod emit;
mod generator;
mod options;
mod syntax;

pub use generator::Generator;
pub use options::{JsonOptions, OPTIONS};
pub use syntax::JsonSyntax;
pub use thriftgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
