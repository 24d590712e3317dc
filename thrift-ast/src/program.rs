//! Program-level definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ConstValue, NamedType, Type};

/// Field requiredness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    Required,
    Optional,
    /// Neither keyword given: written always, never checked on read.
    #[default]
    #[serde(rename = "default", alias = "opt_in_req_out")]
    OptInReqOut,
}

impl Requiredness {
    pub fn is_required(&self) -> bool {
        matches!(self, Requiredness::Required)
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Requiredness::Optional)
    }
}

/// A field of a struct, exception, union or function argument list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: i16,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub requiredness: Requiredness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConstValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Field {
    pub fn new(key: i16, name: impl Into<String>, ty: Type) -> Self {
        Self {
            key,
            name: name.into(),
            ty,
            requiredness: Requiredness::default(),
            default: None,
            doc: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.requiredness = Requiredness::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    pub fn with_default(mut self, value: ConstValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A struct, exception or union definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub is_exception: bool,
    #[serde(default)]
    pub is_union: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_exception: false,
            is_union: false,
            doc: None,
        }
    }

    pub fn exception(name: impl Into<String>) -> Self {
        Self {
            is_exception: true,
            ..Self::new(name)
        }
    }

    pub fn union(name: impl Into<String>) -> Self {
        Self {
            is_union: true,
            ..Self::new(name)
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields in wire order (ascending key). Declaration order is kept for
    /// equal keys.
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.key);
        fields
    }

    /// Look up a field by name.
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// An enum definition. Member names are unique; values need not be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            doc: None,
        }
    }

    pub fn value(mut self, name: impl Into<String>, value: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value,
            doc: None,
        });
        self
    }

    /// Find a member by name. Accepts `MEMBER` and `Enum.MEMBER`.
    pub fn member(&self, ident: &str) -> Option<&EnumValue> {
        let name = ident
            .rsplit_once('.')
            .map(|(_, member)| member)
            .unwrap_or(ident);
        self.values.iter().find(|v| v.name == name)
    }

    /// First member with the given integer value.
    pub fn member_with_value(&self, value: i64) -> Option<&EnumValue> {
        self.values.iter().find(|v| i64::from(v.value) == value)
    }
}

/// A top-level typedef declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typedef {
    pub name: String,
    #[serde(rename = "type")]
    pub target: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// A constant declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    pub value: ConstValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// A service function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default = "void")]
    pub returns: Type,
    #[serde(default)]
    pub arguments: Vec<Field>,
    #[serde(default)]
    pub exceptions: Vec<Field>,
    #[serde(default)]
    pub oneway: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

fn void() -> Type {
    Type::Void
}

impl Function {
    pub fn new(name: impl Into<String>, returns: Type) -> Self {
        Self {
            name: name.into(),
            returns,
            arguments: Vec::new(),
            exceptions: Vec::new(),
            oneway: false,
            doc: None,
        }
    }

    pub fn arg(mut self, field: Field) -> Self {
        self.arguments.push(field);
        self
    }

    pub fn throws(mut self, field: Field) -> Self {
        self.exceptions.push(field);
        self
    }

    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }
}

/// A service definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<NamedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            extends: None,
            doc: None,
        }
    }

    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn extends(mut self, parent: NamedType) -> Self {
        self.extends = Some(parent);
        self
    }
}

/// A parsed Thrift program (one IDL file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Defaults to the document's file stem when loaded from disk.
    #[serde(default)]
    pub name: String,
    /// Target language → namespace, in declaration order.
    #[serde(default)]
    pub namespaces: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub typedefs: Vec<Typedef>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub consts: Vec<Const>,
    /// Structs, unions and exceptions in declaration order.
    #[serde(default)]
    pub structs: Vec<Struct>,
    #[serde(default)]
    pub services: Vec<Service>,
    /// Included programs, resolved by the loader.
    #[serde(skip)]
    pub includes: Vec<Program>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Namespace declared for `language`, if any.
    pub fn namespace(&self, language: &str) -> Option<&str> {
        self.namespaces
            .get(language)
            .or_else(|| self.namespaces.get("*"))
            .map(String::as_str)
    }

    /// The program that defines `named`: this one or a (transitively)
    /// included one.
    pub fn program_for(&self, named: &NamedType) -> Option<&Program> {
        match named.program.as_deref() {
            None => Some(self),
            Some(p) if p == self.name => Some(self),
            Some(p) => self.find_include(p),
        }
    }

    /// Find an included program by name, searching transitively.
    pub fn find_include(&self, name: &str) -> Option<&Program> {
        self.includes.iter().find_map(|inc| {
            if inc.name == name {
                Some(inc)
            } else {
                inc.find_include(name)
            }
        })
    }

    pub fn find_struct(&self, named: &NamedType) -> Option<&Struct> {
        self.program_for(named)?
            .structs
            .iter()
            .find(|s| s.name == named.name)
    }

    pub fn find_enum(&self, named: &NamedType) -> Option<&Enum> {
        self.program_for(named)?
            .enums
            .iter()
            .find(|e| e.name == named.name)
    }

    pub fn find_service(&self, named: &NamedType) -> Option<&Service> {
        self.program_for(named)?
            .services
            .iter()
            .find(|s| s.name == named.name)
    }

    pub fn find_typedef(&self, named: &NamedType) -> Option<&Typedef> {
        self.program_for(named)?
            .typedefs
            .iter()
            .find(|t| t.name == named.name)
    }

    /// Non-exception structs (including unions), in declaration order.
    pub fn plain_structs(&self) -> impl Iterator<Item = &Struct> {
        self.structs.iter().filter(|s| !s.is_exception)
    }

    /// Exceptions, in declaration order.
    pub fn exceptions(&self) -> impl Iterator<Item = &Struct> {
        self.structs.iter().filter(|s| s.is_exception)
    }
}
