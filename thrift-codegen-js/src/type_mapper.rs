//! JavaScript type mapper implementation.
//!
//! JavaScript has no static types, so the mapper serves two purposes:
//! resolving the binding a generated class or enum is reachable through,
//! and rendering JSDoc type expressions for documentation comments.

use indexmap::IndexMap;
use thriftgen_ast::{BaseType, NamedType};
use thriftgen_codegen::language::{NamedKind, TypeMapper};

use crate::naming::JS_NAMING;

#[derive(Debug, Clone)]
pub struct JsTypeMapper {
    current: String,
    node: bool,
    /// Prefix of the current program's declarations (`""`, `ttypes.`).
    local: String,
    /// Program name → prefix of its declarations.
    foreign: IndexMap<String, String>,
}

impl JsTypeMapper {
    pub fn new(current: impl Into<String>, node: bool) -> Self {
        Self {
            current: current.into(),
            node,
            local: String::new(),
            foreign: IndexMap::new(),
        }
    }

    /// Same resolution, with local declarations reached through `prefix`.
    pub fn with_local_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            local: prefix.into(),
            ..self.clone()
        }
    }

    pub fn with_foreign(mut self, program: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.foreign.insert(program.into(), prefix.into());
        self
    }

    pub fn qualify(&self, program: Option<&str>, symbol: &str) -> String {
        let prefix = match program.filter(|p| *p != self.current) {
            Some(p) => self.foreign.get(p).map(String::as_str).unwrap_or_default(),
            None => self.local.as_str(),
        };
        format!("{}{}", prefix, symbol)
    }

    /// Binding of a struct class or enum object.
    pub fn class_name(&self, named: &NamedType) -> String {
        self.qualify(named.program.as_deref(), &JS_NAMING.type_name(&named.name))
    }
}

impl TypeMapper for JsTypeMapper {
    fn language(&self) -> &'static str {
        "js"
    }

    fn void_type(&self) -> String {
        "void".to_string()
    }

    fn base_type(&self, base: BaseType) -> String {
        match base {
            BaseType::Bool => "boolean",
            BaseType::I64 => "Int64",
            BaseType::I8 | BaseType::I16 | BaseType::I32 | BaseType::Double => "number",
            BaseType::String => "string",
            BaseType::Binary if self.node => "Buffer",
            BaseType::Binary => "string",
        }
        .to_string()
    }

    fn named_type(&self, named: &NamedType, _kind: NamedKind) -> String {
        self.class_name(named)
    }

    fn list_type(&self, elem: String) -> String {
        format!("Array<{}>", elem)
    }

    fn set_type(&self, elem: String) -> String {
        format!("Array<{}>", elem)
    }

    fn map_type(&self, key: String, value: String) -> String {
        format!("Object<{}, {}>", key, value)
    }
}
