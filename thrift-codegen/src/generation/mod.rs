//! Helpers shared by the file-producing backends.
//!
//! - [`ImportCollector`] - Import tracking and deduplication
//! - [`foreign_programs`] - Included programs a program actually references

mod imports;
mod includes;

pub use imports::ImportCollector;
pub use includes::foreign_programs;
