//! Thrift abstract syntax tree for thriftgen.
//!
//! This crate holds the read-only program model that every code generator
//! walks. It is produced outside of the generators (by the document loader
//! in `thriftgen-loader`, or directly in tests) and never mutated while
//! generating.
//!
//! # Architecture
//!
//! ```text
//! document (JSON/TOML) → thriftgen-loader → thriftgen-ast (Program) → codegen backends
//! ```
//!
//! The model is:
//! - Language-agnostic (no Go/JS-specific concerns)
//! - Serde-friendly, so documents map one-to-one onto these types
//! - Self-contained: typedef targets are owned inline, so typedef chains
//!   always terminate

mod program;
mod types;
mod value;

pub use program::{
    Const, Enum, EnumValue, Field, Function, Program, Requiredness, Service, Struct, Typedef,
};
pub use types::{BaseType, NamedType, Type};
pub use value::ConstValue;
