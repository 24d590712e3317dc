//! Go-specific naming conventions.

use std::collections::HashMap;

use thriftgen_codegen::{
    GenError, Result,
    language::{NamingConvention, escape_with_suffix},
};
use thriftgen_core::{to_camel_case, to_pascal_case, to_snake_case};

/// Go naming conventions. Types and fields are exported, so both use
/// PascalCase.
pub const GO_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_pascal_case,
    file_case: to_snake_case,
    reserved_words: &[
        // keywords
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
        // predeclared identifiers a parameter could shadow
        "bool", "byte", "error", "float32", "float64", "int", "int8", "int16", "int32", "int64",
        "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr", "nil",
        "true", "false", "iota", "append", "cap", "close", "copy", "delete", "len", "make",
        "new", "panic", "print", "println", "recover",
        // names used by generated method bodies
        "ctx", "p",
    ],
    escape_reserved: escape_with_suffix,
};

/// Methods every generated struct has; fields may not shadow them.
const STRUCT_METHODS: &[&str] = &["Read", "Write", "String", "Error"];

/// Name of a struct member. Collisions with generated methods get the
/// reserved-word suffix.
pub fn member_name(name: &str) -> String {
    let member = GO_NAMING.field_name(name);
    if STRUCT_METHODS.contains(&member.as_str()) {
        (GO_NAMING.escape_reserved)(&member)
    } else {
        member
    }
}

/// Name of a function parameter: camelCase, escaped.
pub fn param_name(name: &str) -> String {
    GO_NAMING.safe_name(&to_camel_case(name))
}

/// Method suffix for a field key (`1` → `1`, `-1` → `Neg1`).
pub fn key_suffix(key: i16) -> String {
    if key < 0 {
        format!("Neg{}", key.unsigned_abs())
    } else {
        key.to_string()
    }
}

/// Identifiers declared in one Go scope, keyed by their rendered form.
///
/// Case conversion is lossy (`user_id` and `userId` are both `UserId`), so
/// two distinct Thrift names can land on the same Go identifier.
#[derive(Debug, Default)]
pub struct GoScope {
    declared: HashMap<String, String>,
}

impl GoScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` renders as `rendered`, failing if another
    /// source already took that identifier.
    pub fn declare(&mut self, source: &str, rendered: impl Into<String>) -> Result<()> {
        let rendered = rendered.into();
        match self.declared.get(&rendered) {
            Some(first) => Err(GenError::NameCollision {
                first: first.clone(),
                second: source.to_string(),
                rendered,
            }),
            None => {
                self.declared.insert(rendered, source.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_names() {
        assert_eq!(GO_NAMING.type_name("Work"), "Work");
        assert_eq!(GO_NAMING.type_name("Calculator_add_args"), "CalculatorAddArgs");
        assert_eq!(GO_NAMING.field_name("whatOp"), "WhatOp");
        assert_eq!(GO_NAMING.field_name("num1"), "Num1");
    }

    #[test]
    fn test_members_avoid_method_names() {
        assert_eq!(member_name("string"), "String_");
        assert_eq!(member_name("reader"), "Reader");
    }

    #[test]
    fn test_params_escape_keywords() {
        assert_eq!(param_name("logid"), "logid");
        assert_eq!(param_name("type"), "type_");
        assert_eq!(param_name("ctx"), "ctx_");
        assert_eq!(param_name("user_id"), "userId");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let once = GO_NAMING.type_name("shared_struct");
        assert_eq!(GO_NAMING.type_name(&once), once);
    }

    #[test]
    fn test_scope_rejects_names_rendering_alike() {
        let mut scope = GoScope::new();
        scope.declare("user_id", member_name("user_id")).unwrap();
        scope.declare("name", member_name("name")).unwrap();

        let err = scope.declare("userId", member_name("userId")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'user_id' and 'userId' both render as 'UserId'"
        );
    }

    #[test]
    fn test_key_suffix() {
        assert_eq!(key_suffix(3), "3");
        assert_eq!(key_suffix(-2), "Neg2");
    }
}
