//! Naming conventions for different programming languages.

/// Language-specific naming conventions.
///
/// Defines how Thrift identifiers become type names, member names and
/// file names, and how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a definition name to a type name (e.g., "user_profile" -> "UserProfile")
    pub type_case: fn(&str) -> String,
    /// Transform a field or argument name to a member name
    pub field_case: fn(&str) -> String,
    /// Transform a program or service name to a file name
    pub file_case: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "type_")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.type_case)(name);
        self.safe_name(&transformed)
    }

    /// Transform and make safe for use as a field, argument or method name.
    pub fn field_name(&self, name: &str) -> String {
        let transformed = (self.field_case)(name);
        self.safe_name(&transformed)
    }

    /// Transform for use as a file name. File names are never escaped.
    pub fn file_name(&self, name: &str) -> String {
        (self.file_case)(name)
    }
}

/// Escape by appending an underscore, the convention shared by the
/// bundled backends.
pub fn escape_with_suffix(name: &str) -> String {
    format!("{}_", name)
}

/// Keep the identifier as written.
pub fn preserve(name: &str) -> String {
    name.to_string()
}

#[cfg(test)]
mod tests {
    use thriftgen_core::{to_camel_case, to_pascal_case, to_snake_case};

    use super::*;

    const TEST_NAMING: NamingConvention = NamingConvention {
        type_case: to_pascal_case,
        field_case: to_camel_case,
        file_case: to_snake_case,
        reserved_words: &["type", "func", "map"],
        escape_reserved: escape_with_suffix,
    };

    #[test]
    fn test_type_and_field_names() {
        assert_eq!(TEST_NAMING.type_name("user_profile"), "UserProfile");
        assert_eq!(TEST_NAMING.field_name("user_id"), "userId");
        assert_eq!(TEST_NAMING.file_name("UserProfile"), "user_profile");
    }

    #[test]
    fn test_reserved_words_escaped() {
        assert!(TEST_NAMING.is_reserved("type"));
        assert_eq!(TEST_NAMING.field_name("type"), "type_");
        assert_eq!(TEST_NAMING.field_name("map"), "map_");
        assert_eq!(TEST_NAMING.field_name("name"), "name");
    }

    #[test]
    fn test_file_names_not_escaped() {
        assert_eq!(TEST_NAMING.file_name("map"), "map");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        for name in ["userId", "type", "map", "num1", "already_snake"] {
            let once = TEST_NAMING.field_name(name);
            assert_eq!(TEST_NAMING.field_name(&once), once, "field {}", name);
        }
        for name in ["Point", "user_profile", "HTTPServer"] {
            let once = TEST_NAMING.type_name(name);
            assert_eq!(TEST_NAMING.type_name(&once), once, "type {}", name);
        }
    }
}
