//! Shared code generation pipeline for thriftgen backends.
//!
//! This crate holds everything a backend needs besides its own literal
//! syntax and templates.
//!
//! # Module Organization
//!
//! - [`classify`] - Type classification and wire types
//! - [`language`] - Naming conventions, type mapping, the backend trait
//! - [`value`] - Constant value rendering
//! - [`plan`] - Reader and writer plans for struct serialization
//! - [`synthetic`] - Argument and result structs of service functions
//! - [`driver`] - Program walk and the per-declaration visitor
//! - [`options`] - Backend option parsing and validation
//! - [`builder`] - Indented code building (CodeBuilder, Indent)
//! - [`generation`] - Import tracking and cross-program references
//! - [`pipeline`] - Validation phases and diagnostics
//! - [`testing`] - Fixtures and test utilities (feature-gated)

// miette's derive generates code that triggers this lint
#![allow(unused_assignments)]

pub mod builder;
pub mod classify;
pub mod driver;
mod error;
pub mod generation;
pub mod language;
pub mod options;
pub mod pipeline;
pub mod plan;
pub mod synthetic;
pub mod value;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{GenError, Result};
