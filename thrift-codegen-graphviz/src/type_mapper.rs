//! Types in IDL spelling, as shown in node labels.

use thriftgen_ast::{BaseType, NamedType, Type};
use thriftgen_codegen::language::{NamedKind, TypeMapper};

#[derive(Debug, Clone)]
pub struct GvTypeMapper {
    current: String,
}

impl GvTypeMapper {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    /// `Name` for local declarations, `program.Name` for foreign ones.
    pub fn qualified(&self, program: Option<&str>, name: &str) -> String {
        match program.filter(|p| *p != self.current) {
            Some(program) => format!("{}.{}", program, name),
            None => name.to_string(),
        }
    }
}

impl TypeMapper for GvTypeMapper {
    fn language(&self) -> &'static str {
        "graphviz"
    }

    fn void_type(&self) -> String {
        "void".to_string()
    }

    fn base_type(&self, base: BaseType) -> String {
        base.as_str().to_string()
    }

    fn named_type(&self, named: &NamedType, _kind: NamedKind) -> String {
        self.qualified(named.program.as_deref(), &named.name)
    }

    fn list_type(&self, elem: String) -> String {
        format!("list<{}>", elem)
    }

    fn set_type(&self, elem: String) -> String {
        format!("set<{}>", elem)
    }

    fn map_type(&self, key: String, value: String) -> String {
        format!("map<{},{}>", key, value)
    }

    fn typedef_name(&self, name: &str, program: Option<&str>, _target: &Type) -> Option<String> {
        Some(self.qualified(program, name))
    }
}
