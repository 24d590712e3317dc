//! Constant values in IDL-like spelling, for const node labels.

use thriftgen_ast::{BaseType, EnumValue, Field, NamedType, Type};
use thriftgen_codegen::value::{ConstSyntax, quoted};

use crate::type_mapper::GvTypeMapper;

pub struct GvSyntax<'a> {
    pub mapper: &'a GvTypeMapper,
}

impl ConstSyntax for GvSyntax<'_> {
    type Output = String;

    fn bool(&self, value: bool) -> String {
        value.to_string()
    }

    fn integer(&self, _base: BaseType, value: i64) -> String {
        value.to_string()
    }

    fn double(&self, value: f64) -> String {
        format!("{:?}", value)
    }

    fn string(&self, value: &str, _binary: bool) -> String {
        quoted(value)
    }

    fn enum_value(&self, named: &NamedType, member: Option<&EnumValue>, value: i64) -> String {
        match member {
            Some(member) => format!(
                "{}.{}",
                self.mapper.qualified(named.program.as_deref(), &named.name),
                member.name
            ),
            None => value.to_string(),
        }
    }

    fn struct_literal(&self, named: &NamedType, fields: Vec<(&Field, String)>) -> String {
        let body: Vec<String> = fields
            .into_iter()
            .map(|(field, value)| format!("{}: {}", field.name, value))
            .collect();
        format!(
            "{}{{{}}}",
            self.mapper.qualified(named.program.as_deref(), &named.name),
            body.join(", ")
        )
    }

    fn list(&self, _elem: &Type, items: Vec<String>) -> String {
        format!("[{}]", items.join(", "))
    }

    fn set(&self, _elem: &Type, items: Vec<String>) -> String {
        format!("[{}]", items.join(", "))
    }

    fn map(&self, _key: &Type, _value: &Type, entries: Vec<(String, String)>) -> String {
        let body: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        format!("{{{}}}", body.join(", "))
    }
}
