//! JavaScript literal syntax for constant values.

use thriftgen_ast::{BaseType, EnumValue, Field, NamedType, Type};
use thriftgen_codegen::value::{ConstSyntax, quoted};

use crate::type_mapper::JsTypeMapper;

pub struct JsSyntax<'a> {
    pub mapper: &'a JsTypeMapper,
    pub node: bool,
}

impl ConstSyntax for JsSyntax<'_> {
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
        if binary && self.node {
            format!("Buffer.from({})", quoted(value))
        } else {
            quoted(value)
        }
    }

    fn enum_value(&self, named: &NamedType, member: Option<&EnumValue>, value: i64) -> String {
        match member {
            Some(member) => format!("{}.{}", self.mapper.class_name(named), member.name),
            None => value.to_string(),
        }
    }

    fn struct_literal(&self, named: &NamedType, fields: Vec<(&Field, String)>) -> String {
        let body: Vec<String> = fields
            .into_iter()
            .map(|(field, value)| format!("{}: {}", quoted(&field.name), value))
            .collect();
        format!(
            "new {}({{{}}})",
            self.mapper.class_name(named),
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
            .map(|(k, v)| format!("{}: {}", computed_key(&k), v))
            .collect();
        format!("{{{}}}", body.join(", "))
    }
}

/// String and number literals are valid property names as they are;
/// anything else is a computed key.
fn computed_key(key: &str) -> String {
    let literal = key.starts_with('"') || key.parse::<f64>().is_ok_and(|n| n >= 0.0);
    if literal {
        key.to_string()
    } else {
        format!("[{}]", key)
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::ConstValue;
    use thriftgen_codegen::{testing::tutorial_program, value::render_const_value};

    use super::*;

    fn render(ty: &Type, value: &ConstValue) -> String {
        let program = tutorial_program();
        let mapper = JsTypeMapper::new("tutorial", true);
        let syntax = JsSyntax {
            mapper: &mapper,
            node: true,
        };
        render_const_value(&syntax, &program, ty, value).unwrap()
    }

    #[test]
    fn test_map_keeps_order() {
        let ty = Type::map(Type::string(), Type::string());
        let value = ConstValue::Map(vec![
            (ConstValue::String("hello".into()), ConstValue::String("world".into())),
            (ConstValue::String("goodnight".into()), ConstValue::String("moon".into())),
        ]);
        insta::assert_snapshot!(render(&ty, &value), @r#"{"hello": "world", "goodnight": "moon"}"#);
    }

    #[test]
    fn test_enum_member_or_integer() {
        let ty = Type::enum_("Operation");
        assert_eq!(render(&ty, &ConstValue::Integer(2)), "Operation.SUBTRACT");
        assert_eq!(render(&ty, &ConstValue::Integer(42)), "42");
    }

    #[test]
    fn test_struct_literal() {
        let value = ConstValue::Map(vec![
            (ConstValue::String("num1".into()), ConstValue::Integer(7)),
            (ConstValue::String("comment".into()), ConstValue::String("x".into())),
        ]);
        assert_eq!(
            render(&Type::struct_("Work"), &value),
            r#"new Work({"num1": 7, "comment": "x"})"#
        );
    }

    #[test]
    fn test_collections() {
        let list = ConstValue::List(vec![ConstValue::Integer(1), ConstValue::Integer(2)]);
        assert_eq!(render(&Type::list(Type::I16), &list), "[1, 2]");
        assert_eq!(
            render(&Type::binary(), &ConstValue::String("ab".into())),
            r#"Buffer.from("ab")"#
        );
    }

    #[test]
    fn test_computed_keys() {
        assert_eq!(computed_key("\"a\""), "\"a\"");
        assert_eq!(computed_key("3"), "3");
        assert_eq!(computed_key("-3"), "[-3]");
        assert_eq!(computed_key("Operation.ADD"), "[Operation.ADD]");
    }
}
