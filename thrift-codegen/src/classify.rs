//! Type classification.
//!
//! Backends never match on [`Type`] directly when making structural
//! decisions. They [`resolve`] typedefs first and then branch on the closed
//! [`Category`], so every backend handles the same set of cases.

use std::fmt;

use thriftgen_ast::{BaseType, NamedType, Type};

/// Structural category of a type after typedef resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    Void,
    Base(BaseType),
    Enum(&'a NamedType),
    Struct(&'a NamedType),
    Exception(&'a NamedType),
    List(&'a Type),
    Set(&'a Type),
    Map(&'a Type, &'a Type),
}

impl Category<'_> {
    /// Returns true for list, set and map.
    pub fn is_container(&self) -> bool {
        matches!(self, Category::List(_) | Category::Set(_) | Category::Map(..))
    }

    /// Returns true for struct and exception.
    pub fn is_struct_like(&self) -> bool {
        matches!(self, Category::Struct(_) | Category::Exception(_))
    }
}

/// Strip typedef wrappers down to the first non-typedef type.
pub fn resolve(ty: &Type) -> &Type {
    let mut current = ty;
    while let Type::Typedef { target, .. } = current {
        current = target;
    }
    current
}

/// Classify a type, looking through typedefs.
pub fn classify(ty: &Type) -> Category<'_> {
    match resolve(ty) {
        Type::Void => Category::Void,
        Type::Bool => Category::Base(BaseType::Bool),
        Type::I8 => Category::Base(BaseType::I8),
        Type::I16 => Category::Base(BaseType::I16),
        Type::I32 => Category::Base(BaseType::I32),
        Type::I64 => Category::Base(BaseType::I64),
        Type::Double => Category::Base(BaseType::Double),
        Type::String { binary: false } => Category::Base(BaseType::String),
        Type::String { binary: true } => Category::Base(BaseType::Binary),
        Type::Enum(n) => Category::Enum(n),
        Type::Struct(n) => Category::Struct(n),
        Type::Exception(n) => Category::Exception(n),
        Type::List { elem } => Category::List(elem),
        Type::Set { elem } => Category::Set(elem),
        Type::Map { key, value } => Category::Map(key, value),
        Type::Typedef { .. } => unreachable!("resolve() strips typedefs"),
    }
}

/// Protocol-level type tags written in field and container headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Stop = 0,
    Void = 1,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl WireType {
    /// Numeric type id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Upper-case protocol constant name (`I32`, `STRUCT`, ...).
    pub fn constant_name(self) -> &'static str {
        match self {
            WireType::Stop => "STOP",
            WireType::Void => "VOID",
            WireType::Bool => "BOOL",
            WireType::Byte => "BYTE",
            WireType::Double => "DOUBLE",
            WireType::I16 => "I16",
            WireType::I32 => "I32",
            WireType::I64 => "I64",
            WireType::String => "STRING",
            WireType::Struct => "STRUCT",
            WireType::Map => "MAP",
            WireType::Set => "SET",
            WireType::List => "LIST",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constant_name())
    }
}

/// Wire type used to transmit values of `ty`. Enums travel as `I32`.
pub fn wire_type(ty: &Type) -> WireType {
    match classify(ty) {
        Category::Void => WireType::Void,
        Category::Base(base) => match base {
            BaseType::Bool => WireType::Bool,
            BaseType::I8 => WireType::Byte,
            BaseType::I16 => WireType::I16,
            BaseType::I32 => WireType::I32,
            BaseType::I64 => WireType::I64,
            BaseType::Double => WireType::Double,
            BaseType::String | BaseType::Binary => WireType::String,
        },
        Category::Enum(_) => WireType::I32,
        Category::Struct(_) | Category::Exception(_) => WireType::Struct,
        Category::List(_) => WireType::List,
        Category::Set(_) => WireType::Set,
        Category::Map(..) => WireType::Map,
    }
}
