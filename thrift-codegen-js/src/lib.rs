//! JavaScript code generator for thriftgen.
//!
//! This crate renders a Thrift program as JavaScript for the Apache Thrift
//! runtime, either as CommonJS modules for node.js (`node`) or as browser
//! scripts declaring globals.
//!
//! # Usage
//!
//! ```ignore
//! use thriftgen_codegen_js::{Generator, LanguageCodegen};
//! use thriftgen_codegen::options::RawOptions;
//! use std::path::Path;
//!
//! let options: RawOptions = "node,strict".parse()?;
//! let generator = Generator::new(&program, &options)?;
//!
//! // Preview files without writing
//! let files = generator.preview()?;
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("gen-nodejs"))?;
//! ```
//!
//! # Generated Output
//!
//! - `<program>_types.js` - enums, structs, exceptions and constants
//! - `<Service>.js` - argument and result wrappers, client and processor
//!
//! # Options
//!
//! - `node` - CommonJS modules instead of browser globals
//! - `with_ns` - also publish node exports on `global.<namespace>`
//! - `strict` - readers throw on unknown field ids instead of skipping

mod emit;
mod generator;
mod naming;
mod options;
mod syntax;
mod type_mapper;

pub use generator::Generator;
pub use naming::JS_NAMING;
pub use options::{JsOptions, OPTIONS};
pub use syntax::JsSyntax;
pub use thriftgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_mapper::JsTypeMapper;
