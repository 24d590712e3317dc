//! Go code generator for thriftgen.
//!
//! Renders a loaded Thrift program into one Go source file that targets
//! the Apache Thrift Go runtime: enums, typedefs, constants, structs with
//! their `Read`/`Write` methods, and for every service a handler
//! interface, a client and a processor.

mod emit;
mod generator;
mod naming;
mod options;
mod syntax;
mod type_mapper;

pub use generator::Generator;
pub use naming::GO_NAMING;
pub use options::{DEFAULT_THRIFT_IMPORT, GoOptions, GoPackage, OPTIONS};
pub use syntax::GoSyntax;
pub use thriftgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_mapper::GoTypeMapper;
