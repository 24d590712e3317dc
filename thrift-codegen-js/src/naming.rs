//! JavaScript-specific naming conventions.

use thriftgen_codegen::language::{NamingConvention, escape_with_suffix, preserve};

/// JavaScript naming conventions.
///
/// Thrift names are kept as written: properties may be any identifier
/// and classes follow the IDL. Only bindings (parameters, locals and
/// top-level declarations) are escaped.
pub const JS_NAMING: NamingConvention = NamingConvention {
    type_case: preserve,
    field_case: preserve,
    file_case: preserve,
    reserved_words: &[
        // keywords
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "let", "new", "null", "return", "static", "super", "switch",
        "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield", "await",
        "implements", "interface", "package", "private", "protected", "public", "arguments", "eval",
        "undefined",
        // runtime and module bindings of generated files
        "Thrift", "thrift", "ttypes", "module", "exports", "require", "global",
        // locals of generated method bodies
        "self", "input", "output", "params", "args", "callback", "result",
    ],
    escape_reserved: escape_with_suffix,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_preserved() {
        assert_eq!(JS_NAMING.type_name("Calculator_add_args"), "Calculator_add_args");
        assert_eq!(JS_NAMING.field_name("whatOp"), "whatOp");
        assert_eq!(JS_NAMING.file_name("SharedService"), "SharedService");
    }

    #[test]
    fn test_bindings_escape_reserved_words() {
        assert_eq!(JS_NAMING.safe_name("class"), "class_");
        assert_eq!(JS_NAMING.safe_name("output"), "output_");
        assert_eq!(JS_NAMING.safe_name("num1"), "num1");
    }
}
