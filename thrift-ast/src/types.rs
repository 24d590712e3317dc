//! Type references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a named definition (struct, exception, enum, typedef or
/// service), optionally qualified by the program that defines it.
///
/// `program` is `None` for definitions in the current program. A program
/// name different from the current one points into an included program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl NamedType {
    /// Reference a definition in the current program.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: None,
        }
    }

    /// Reference a definition in another (included) program.
    pub fn external(program: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: Some(program.into()),
        }
    }

    /// Returns the defining program if it differs from `current`.
    pub fn foreign_program<'a>(&'a self, current: &str) -> Option<&'a str> {
        self.program.as_deref().filter(|p| *p != current)
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.program {
            Some(program) => write!(f, "{}.{}", program, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A Thrift type.
///
/// Serialized with an internal `kind` tag, e.g. `{"kind": "i32"}` or
/// `{"kind": "list", "elem": {"kind": "string"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Void,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    String {
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        binary: bool,
    },
    Enum(NamedType),
    Struct(NamedType),
    Exception(NamedType),
    Typedef {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        program: Option<String>,
        target: Box<Type>,
    },
    List {
        elem: Box<Type>,
    },
    Set {
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
}

impl Type {
    pub fn string() -> Self {
        Self::String { binary: false }
    }

    pub fn binary() -> Self {
        Self::String { binary: true }
    }

    pub fn enum_(name: impl Into<String>) -> Self {
        Self::Enum(NamedType::local(name))
    }

    pub fn struct_(name: impl Into<String>) -> Self {
        Self::Struct(NamedType::local(name))
    }

    pub fn exception(name: impl Into<String>) -> Self {
        Self::Exception(NamedType::local(name))
    }

    pub fn typedef(name: impl Into<String>, target: Type) -> Self {
        Self::Typedef {
            name: name.into(),
            program: None,
            target: Box::new(target),
        }
    }

    pub fn list(elem: Type) -> Self {
        Self::List {
            elem: Box::new(elem),
        }
    }

    pub fn set(elem: Type) -> Self {
        Self::Set {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns true for `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// The named definition this type refers to, if any.
    ///
    /// Typedefs are not looked through.
    pub fn named(&self) -> Option<&NamedType> {
        match self {
            Type::Enum(n) | Type::Struct(n) | Type::Exception(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    /// Formats the type in IDL spelling (`map<string,list<i32>>`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Bool => f.write_str("bool"),
            Type::I8 => f.write_str("i8"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::Double => f.write_str("double"),
            Type::String { binary: false } => f.write_str("string"),
            Type::String { binary: true } => f.write_str("binary"),
            Type::Enum(n) | Type::Struct(n) | Type::Exception(n) => write!(f, "{}", n),
            Type::Typedef { name, program, .. } => match program {
                Some(p) => write!(f, "{}.{}", p, name),
                None => f.write_str(name),
            },
            Type::List { elem } => write!(f, "list<{}>", elem),
            Type::Set { elem } => write!(f, "set<{}>", elem),
            Type::Map { key, value } => write!(f, "map<{},{}>", key, value),
        }
    }
}

/// Primitive (base) types after typedef resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

impl BaseType {
    /// IDL spelling of the base type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Bool => "bool",
            BaseType::I8 => "i8",
            BaseType::I16 => "i16",
            BaseType::I32 => "i32",
            BaseType::I64 => "i64",
            BaseType::Double => "double",
            BaseType::String => "string",
            BaseType::Binary => "binary",
        }
    }

    /// Returns true for the integral types.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            BaseType::I8 | BaseType::I16 | BaseType::I32 | BaseType::I64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_idl_spelling() {
        let ty = Type::map(Type::string(), Type::list(Type::I32));
        assert_eq!(ty.to_string(), "map<string,list<i32>>");
        assert_eq!(Type::binary().to_string(), "binary");
        assert_eq!(
            Type::Struct(NamedType::external("shared", "Info")).to_string(),
            "shared.Info"
        );
    }

    #[test]
    fn test_deserialize_tagged() {
        let ty: Type = serde_json::from_str(
            r#"{"kind": "map", "key": {"kind": "string"}, "value": {"kind": "struct", "name": "Point"}}"#,
        )
        .unwrap();
        assert_eq!(ty, Type::map(Type::string(), Type::struct_("Point")));
    }

    #[test]
    fn test_deserialize_typedef_owns_target() {
        let ty: Type = serde_json::from_str(
            r#"{"kind": "typedef", "name": "UserId", "target": {"kind": "i64"}}"#,
        )
        .unwrap();
        assert_eq!(ty, Type::typedef("UserId", Type::I64));
    }

    #[test]
    fn test_foreign_program() {
        let local = NamedType::local("A");
        let same = NamedType::external("tutorial", "A");
        let other = NamedType::external("shared", "A");
        assert_eq!(local.foreign_program("tutorial"), None);
        assert_eq!(same.foreign_program("tutorial"), None);
        assert_eq!(other.foreign_program("tutorial"), Some("shared"));
    }

    #[test]
    fn test_base_type_is_integer() {
        assert!(BaseType::I8.is_integer());
        assert!(BaseType::I64.is_integer());
        assert!(!BaseType::Double.is_integer());
        assert!(!BaseType::Binary.is_integer());
    }
}
