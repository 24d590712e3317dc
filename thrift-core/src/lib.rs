//! Core utilities and types for thriftgen.
//!
//! This crate provides the filesystem and string helpers shared by the
//! code generation crates.

mod file;
mod utils;

// File operations
pub use file::{File, WriteResult};
// String utilities
pub use utils::{to_camel_case, to_pascal_case, to_snake_case};

/// Tool name stamped into generated file headers.
pub const GENERATOR_NAME: &str = "thriftgen";
