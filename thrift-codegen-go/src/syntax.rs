//! Go literal syntax for constant values.

use thriftgen_ast::{BaseType, EnumValue, Field, NamedType, Program, Type};
use thriftgen_codegen::{
    language::TypeMapper,
    plan::{Presence, presence},
    value::{ConstSyntax, quoted},
};

use crate::{
    naming::{GO_NAMING, member_name},
    type_mapper::{GoTypeMapper, is_boxed},
};

/// Renders constant values as Go expressions.
pub struct GoSyntax<'a> {
    pub mapper: &'a GoTypeMapper,
    pub program: &'a Program,
}

impl ConstSyntax for GoSyntax<'_> {
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

    fn string(&self, value: &str, binary: bool) -> String {
        if binary {
            format!("[]byte({})", quoted(value))
        } else {
            quoted(value)
        }
    }

    fn enum_value(&self, named: &NamedType, member: Option<&EnumValue>, value: i64) -> String {
        match member {
            Some(member) => self.mapper.qualify(
                named.program.as_deref(),
                &format!("{}_{}", GO_NAMING.type_name(&named.name), member.name),
            ),
            None => format!("{}({})", self.mapper.bare_name(named), value),
        }
    }

    fn struct_literal(&self, named: &NamedType, fields: Vec<(&Field, String)>) -> String {
        let is_union = self
            .program
            .find_struct(named)
            .is_some_and(|def| def.is_union);

        let body: Vec<String> = fields
            .into_iter()
            .map(|(field, value)| {
                let presence = if is_union {
                    Presence::IfSet
                } else {
                    presence(field)
                };
                let value = if is_boxed(&field.ty, presence) {
                    format!("{}({})", self.mapper.pointer_helper(&field.ty), value)
                } else {
                    value
                };
                format!("{}: {}", member_name(&field.name), value)
            })
            .collect();

        format!("&{}{{{}}}", self.mapper.bare_name(named), body.join(", "))
    }

    fn list(&self, elem: &Type, items: Vec<String>) -> String {
        format!(
            "{}{{{}}}",
            self.mapper.list_type(self.mapper.type_name(elem)),
            items.join(", ")
        )
    }

    fn set(&self, elem: &Type, items: Vec<String>) -> String {
        format!(
            "{}{{{}}}",
            self.mapper.set_type(self.mapper.type_name(elem)),
            items.join(", ")
        )
    }

    fn map(&self, key: &Type, value: &Type, entries: Vec<(String, String)>) -> String {
        let body: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        format!(
            "{}{{{}}}",
            self.mapper
                .map_type(self.mapper.type_name(key), self.mapper.type_name(value)),
            body.join(", ")
        )
    }
}
