//! Built-in lints for program validation.

mod enum_values;
mod field_keys;
mod oneway;
mod union;

pub use enum_values::EnumValueLint;
pub use field_keys::FieldKeyLint;
pub use oneway::OnewayLint;
pub use union::UnionLint;
