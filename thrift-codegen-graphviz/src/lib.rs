//! Graphviz diagram generator for thriftgen.
//!
//! Writes `<program>.gv`, a dot digraph with one record node per typedef,
//! enum, constant, struct and function. Edges run from the field,
//! parameter or return value that references a type to that type's node;
//! services are drawn as clusters. Render with `dot -Tsvg`.
//!
//! # Options
//!
//! - `exceptions` - draw dashed edges from functions to their exceptions

mod emit;
mod generator;
mod options;
mod syntax;
mod type_mapper;

pub use generator::Generator;
pub use options::{GvOptions, OPTIONS};
pub use syntax::GvSyntax;
pub use thriftgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_mapper::GvTypeMapper;
