//! Go type mapper implementation.

use indexmap::IndexMap;
use thriftgen_ast::{BaseType, Field, NamedType, Type};
use thriftgen_codegen::{
    GenError, Result,
    classify::{Category, classify},
    language::{NamedKind, TypeMapper},
    plan::Presence,
};

use crate::naming::GO_NAMING;

/// Go type mapper.
///
/// Structs and exceptions are always referenced through pointers. Types
/// from other programs are qualified with the alias of their package.
#[derive(Debug, Clone)]
pub struct GoTypeMapper {
    current: String,
    /// Program name → package alias.
    aliases: IndexMap<String, String>,
}

impl GoTypeMapper {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            aliases: IndexMap::new(),
        }
    }

    pub fn with_alias(mut self, program: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(program.into(), alias.into());
        self
    }

    /// Qualify `symbol` with the package of `program` when that is not
    /// the current program.
    pub fn qualify(&self, program: Option<&str>, symbol: &str) -> String {
        match program.filter(|p| *p != self.current) {
            Some(p) => {
                let alias = self.aliases.get(p).map(String::as_str).unwrap_or(p);
                format!("{}.{}", alias, symbol)
            }
            None => symbol.to_string(),
        }
    }

    /// Type name of a definition, without the pointer.
    pub fn bare_name(&self, named: &NamedType) -> String {
        self.qualify(named.program.as_deref(), &GO_NAMING.type_name(&named.name))
    }

    /// Constructor of a struct (`NewWork`, `shared.NewSharedStruct`).
    pub fn constructor(&self, named: &NamedType) -> String {
        self.qualify(
            named.program.as_deref(),
            &format!("New{}", GO_NAMING.type_name(&named.name)),
        )
    }

    /// Go type of a struct field with the given presence.
    pub fn field_type(&self, field: &Field, presence: Presence) -> String {
        let ty = self.type_name(&field.ty);
        if is_boxed(&field.ty, presence) {
            format!("*{}", ty)
        } else {
            ty
        }
    }

    /// Function turning a value of `ty` into a pointer.
    pub fn pointer_helper(&self, ty: &Type) -> String {
        if let Type::Typedef { name, program, .. } = ty {
            return self.qualify(
                program.as_deref(),
                &format!("{}Ptr", GO_NAMING.type_name(name)),
            );
        }
        match classify(ty) {
            Category::Enum(named) => self.qualify(
                named.program.as_deref(),
                &format!("{}Ptr", GO_NAMING.type_name(&named.name)),
            ),
            Category::Base(base) => format!("thrift.{}", runtime_pointer(base)),
            _ => String::new(),
        }
    }
}

impl TypeMapper for GoTypeMapper {
    fn language(&self) -> &'static str {
        "go"
    }

    fn void_type(&self) -> String {
        String::new()
    }

    fn base_type(&self, base: BaseType) -> String {
        match base {
            BaseType::Bool => "bool",
            BaseType::I8 => "int8",
            BaseType::I16 => "int16",
            BaseType::I32 => "int32",
            BaseType::I64 => "int64",
            BaseType::Double => "float64",
            BaseType::String => "string",
            BaseType::Binary => "[]byte",
        }
        .to_string()
    }

    fn named_type(&self, named: &NamedType, kind: NamedKind) -> String {
        let name = self.bare_name(named);
        match kind {
            NamedKind::Enum => name,
            NamedKind::Struct | NamedKind::Exception => format!("*{}", name),
        }
    }

    fn list_type(&self, elem: String) -> String {
        format!("[]{}", elem)
    }

    fn set_type(&self, elem: String) -> String {
        format!("[]{}", elem)
    }

    fn map_type(&self, key: String, value: String) -> String {
        format!("map[{}]{}", key, value)
    }

    fn typedef_name(&self, name: &str, program: Option<&str>, target: &Type) -> Option<String> {
        let alias = self.qualify(program, &GO_NAMING.type_name(name));
        if classify(target).is_struct_like() {
            Some(format!("*{}", alias))
        } else {
            Some(alias)
        }
    }
}

/// True when a field of `ty` is stored behind a pointer so that "unset"
/// is representable.
pub fn is_boxed(ty: &Type, presence: Presence) -> bool {
    presence == Presence::IfSet
        && match classify(ty) {
            Category::Base(base) => base != BaseType::Binary,
            Category::Enum(_) => true,
            _ => false,
        }
}

/// Go can only key maps by comparable types.
pub fn check_supported(field: &Field) -> Result<()> {
    check_type(field, &field.ty)
}

fn check_type(field: &Field, ty: &Type) -> Result<()> {
    match classify(ty) {
        Category::Void => Err(GenError::UnsupportedFieldType {
            field: field.name.clone(),
            ty: ty.to_string(),
        }),
        Category::List(elem) | Category::Set(elem) => check_type(field, elem),
        Category::Map(key, value) => {
            let comparable = match classify(key) {
                Category::Base(base) => base != BaseType::Binary,
                Category::Enum(_) | Category::Struct(_) | Category::Exception(_) => true,
                _ => false,
            };
            if !comparable {
                return Err(GenError::UnsupportedFieldType {
                    field: field.name.clone(),
                    ty: ty.to_string(),
                });
            }
            check_type(field, key)?;
            check_type(field, value)
        }
        _ => Ok(()),
    }
}

fn runtime_pointer(base: BaseType) -> &'static str {
    match base {
        BaseType::Bool => "BoolPtr",
        BaseType::I8 => "Int8Ptr",
        BaseType::I16 => "Int16Ptr",
        BaseType::I32 => "Int32Ptr",
        BaseType::I64 => "Int64Ptr",
        BaseType::Double => "Float64Ptr",
        BaseType::String => "StringPtr",
        BaseType::Binary => "ByteSlicePtr",
    }
}
