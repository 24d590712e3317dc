//! Constant values as JSON trees.

use serde_json::{Map, Number, Value, json};
use thriftgen_ast::{BaseType, EnumValue, Field, NamedType, Type};
use thriftgen_codegen::value::ConstSyntax;

/// Renders constants as JSON data rather than source text.
///
/// Enums become their integer value and binary strings stay strings.
/// Maps become arrays of `{"key", "value"}` objects, which keep the
/// document order and allow non-string keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSyntax;

impl ConstSyntax for JsonSyntax {
    type Output = Value;

    fn bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn integer(&self, _base: BaseType, value: i64) -> Value {
        Value::from(value)
    }

    fn double(&self, value: f64) -> Value {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }

    fn string(&self, value: &str, _binary: bool) -> Value {
        Value::String(value.to_string())
    }

    fn enum_value(&self, _named: &NamedType, _member: Option<&EnumValue>, value: i64) -> Value {
        Value::from(value)
    }

    fn struct_literal(&self, _named: &NamedType, fields: Vec<(&Field, Value)>) -> Value {
        let object: Map<String, Value> = fields
            .into_iter()
            .map(|(field, value)| (field.name.clone(), value))
            .collect();
        Value::Object(object)
    }

    fn list(&self, _elem: &Type, items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    fn set(&self, _elem: &Type, items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    fn map(&self, _key: &Type, _value: &Type, entries: Vec<(Value, Value)>) -> Value {
        entries
            .into_iter()
            .map(|(key, value)| json!({"key": key, "value": value}))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::ConstValue;
    use thriftgen_codegen::{testing::tutorial_program, value::render_const_value};

    use super::*;

    fn render(ty: &Type, value: &ConstValue) -> Value {
        render_const_value(&JsonSyntax, &tutorial_program(), ty, value).unwrap()
    }

    #[test]
    fn test_map_entries_keep_order() {
        let program = tutorial_program();
        let constant = &program.consts[1];
        insta::assert_snapshot!(
            render(&constant.ty, &constant.value).to_string(),
            @r#"[{"key":"hello","value":"world"},{"key":"goodnight","value":"moon"}]"#
        );
    }

    #[test]
    fn test_enum_renders_its_value() {
        let value = ConstValue::Identifier("Operation.DIVIDE".into());
        assert_eq!(render(&Type::enum_("Operation"), &value), json!(4));
    }

    #[test]
    fn test_struct_literal_is_an_object() {
        let value = ConstValue::Map(vec![
            (ConstValue::String("num2".into()), ConstValue::Integer(3)),
            (ConstValue::String("op".into()), ConstValue::Integer(1)),
        ]);
        assert_eq!(
            render(&Type::struct_("Work"), &value),
            json!({"num2": 3, "op": 1})
        );
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&Type::Bool, &ConstValue::Integer(1)), json!(true));
        assert_eq!(render(&Type::Double, &ConstValue::Double(0.5)), json!(0.5));
        assert_eq!(JsonSyntax.double(f64::NAN), Value::Null);
    }
}
