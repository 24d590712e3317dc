//! Core operations.
//!
//! This module contains the business logic for thriftgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod generators;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use generators::generators;
