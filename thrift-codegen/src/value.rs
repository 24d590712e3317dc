//! Constant value rendering.
//!
//! [`render_const_value`] walks a [`ConstValue`] against its declared
//! [`Type`] and hands each leaf and collection to a backend's
//! [`ConstSyntax`]. The recursion, the shape checks and the lookup of enum
//! members and struct fields are shared; only the literal forms differ.

use thriftgen_ast::{BaseType, ConstValue, EnumValue, Field, NamedType, Program, Type};
use tracing::trace;

use crate::{
    GenError, Result,
    classify::{Category, classify},
};

/// Literal syntax of one backend.
///
/// `Output` is usually `String`; structured backends may build a tree
/// (e.g. a JSON value) instead.
pub trait ConstSyntax {
    type Output;

    fn bool(&self, value: bool) -> Self::Output;

    /// Integer literal for `i8`..`i64`.
    fn integer(&self, base: BaseType, value: i64) -> Self::Output;

    fn double(&self, value: f64) -> Self::Output;

    fn string(&self, value: &str, binary: bool) -> Self::Output;

    /// Enum constant. `member` is the declared member the value resolved
    /// to, if any; `value` is always the integer to evaluate to.
    fn enum_value(&self, named: &NamedType, member: Option<&EnumValue>, value: i64)
    -> Self::Output;

    /// Struct literal with its fields in the order they were written.
    fn struct_literal(
        &self,
        named: &NamedType,
        fields: Vec<(&Field, Self::Output)>,
    ) -> Self::Output;

    fn list(&self, elem: &Type, items: Vec<Self::Output>) -> Self::Output;

    fn set(&self, elem: &Type, items: Vec<Self::Output>) -> Self::Output;

    /// Map literal. Entries arrive in document order.
    fn map(
        &self,
        key: &Type,
        value: &Type,
        entries: Vec<(Self::Output, Self::Output)>,
    ) -> Self::Output;
}

/// Render `value` as a constant of type `ty`.
///
/// `program` is the program the type is written in; named types are
/// looked up there and in its includes.
pub fn render_const_value<S: ConstSyntax + ?Sized>(
    syntax: &S,
    program: &Program,
    ty: &Type,
    value: &ConstValue,
) -> Result<S::Output> {
    trace!(ty = %ty, kind = value.kind(), "rendering constant");

    match (classify(ty), value) {
        (Category::Void, _) => Err(GenError::unsupported_const(
            ty,
            value,
            "void cannot hold a value",
        )),
        (Category::Base(BaseType::Bool), ConstValue::Integer(n)) => Ok(syntax.bool(*n != 0)),
        (Category::Base(BaseType::Bool), ConstValue::Identifier(id))
            if id == "true" || id == "false" =>
        {
            Ok(syntax.bool(id == "true"))
        }
        (Category::Base(base), ConstValue::Integer(n)) if base.is_integer() => {
            check_range(base, *n, ty, value)?;
            Ok(syntax.integer(base, *n))
        }
        (Category::Base(BaseType::Double), ConstValue::Integer(n)) => {
            Ok(syntax.double(*n as f64))
        }
        (Category::Base(BaseType::Double), ConstValue::Double(d)) if d.is_finite() => {
            Ok(syntax.double(*d))
        }
        (Category::Base(BaseType::Double), ConstValue::Double(_)) => Err(
            GenError::unsupported_const(ty, value, "NaN and infinity have no literal form"),
        ),
        (Category::Base(BaseType::String), ConstValue::String(s)) => Ok(syntax.string(s, false)),
        (Category::Base(BaseType::Binary), ConstValue::String(s)) => Ok(syntax.string(s, true)),
        (Category::Base(_), _) => Err(GenError::unsupported_const(
            ty,
            value,
            "literal does not match the base type",
        )),
        (Category::Enum(named), value) => render_enum(syntax, program, named, ty, value),
        (Category::Struct(named) | Category::Exception(named), ConstValue::Map(entries)) => {
            render_struct(syntax, program, named, entries)
        }
        (Category::Struct(_) | Category::Exception(_), _) => Err(GenError::unsupported_const(
            ty,
            value,
            "struct constants are written as a map of field names",
        )),
        (Category::List(elem), ConstValue::List(items)) => {
            let items = render_items(syntax, program, elem, items)?;
            Ok(syntax.list(elem, items))
        }
        (Category::Set(elem), ConstValue::List(items)) => {
            let items = render_items(syntax, program, elem, items)?;
            Ok(syntax.set(elem, items))
        }
        (Category::Map(key, val), ConstValue::Map(entries)) => {
            let entries = entries
                .iter()
                .map(|(k, v)| {
                    Ok((
                        render_const_value(syntax, program, key, k)?,
                        render_const_value(syntax, program, val, v)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(syntax.map(key, val, entries))
        }
        (Category::List(_) | Category::Set(_) | Category::Map(..), _) => Err(
            GenError::unsupported_const(ty, value, "collection literal expected"),
        ),
    }
}

fn check_range(base: BaseType, n: i64, ty: &Type, value: &ConstValue) -> Result<()> {
    let fits = match base {
        BaseType::I8 => i8::try_from(n).is_ok(),
        BaseType::I16 => i16::try_from(n).is_ok(),
        BaseType::I32 => i32::try_from(n).is_ok(),
        _ => true,
    };
    if fits {
        Ok(())
    } else {
        Err(GenError::unsupported_const(
            ty,
            value,
            format!("{} does not fit in {}", n, base.as_str()),
        ))
    }
}

fn render_items<S: ConstSyntax + ?Sized>(
    syntax: &S,
    program: &Program,
    elem: &Type,
    items: &[ConstValue],
) -> Result<Vec<S::Output>> {
    items
        .iter()
        .map(|item| render_const_value(syntax, program, elem, item))
        .collect()
}

fn render_enum<S: ConstSyntax + ?Sized>(
    syntax: &S,
    program: &Program,
    named: &NamedType,
    ty: &Type,
    value: &ConstValue,
) -> Result<S::Output> {
    let def = program
        .find_enum(named)
        .ok_or_else(|| GenError::unknown_type(named))?;

    match value {
        ConstValue::Integer(n) => Ok(syntax.enum_value(named, def.member_with_value(*n), *n)),
        ConstValue::Identifier(ident) => {
            let member = def.member(ident).ok_or_else(|| GenError::UnknownConstant {
                enum_name: def.name.clone(),
                ident: ident.clone(),
            })?;
            Ok(syntax.enum_value(named, Some(member), i64::from(member.value)))
        }
        _ => Err(GenError::unsupported_const(
            ty,
            value,
            "enum constants are integers or member names",
        )),
    }
}

fn render_struct<S: ConstSyntax + ?Sized>(
    syntax: &S,
    program: &Program,
    named: &NamedType,
    entries: &[(ConstValue, ConstValue)],
) -> Result<S::Output> {
    // Field types are written relative to the program that declares the struct.
    let owner = program
        .program_for(named)
        .ok_or_else(|| GenError::unknown_type(named))?;
    let def = program
        .find_struct(named)
        .ok_or_else(|| GenError::unknown_type(named))?;

    let mut fields = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let Some(name) = key.as_str() else {
            return Err(GenError::unsupported_const(
                &Type::string(),
                key,
                format!("field names of {} must be strings", def.name),
            ));
        };
        let field = def
            .field_named(name)
            .ok_or_else(|| GenError::UnsupportedConstType {
                ty: def.name.clone(),
                value_kind: value.kind().to_string(),
                context: format!("{} has no field '{}'", def.name, name),
            })?;
        fields.push((field, render_const_value(syntax, owner, &field.ty, value)?));
    }

    Ok(syntax.struct_literal(named, fields))
}

/// Double-quoted string literal with C-style escapes, valid in both Go
/// and JavaScript source.
pub fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::{Enum, Struct};

    use super::*;

    /// Renders IDL-like literal text.
    struct Idl;

    impl ConstSyntax for Idl {
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
            format!("{:?}", value)
        }

        fn enum_value(&self, named: &NamedType, member: Option<&EnumValue>, value: i64) -> String {
            match member {
                Some(m) => format!("{}.{}", named.name, m.name),
                None => value.to_string(),
            }
        }

        fn struct_literal(&self, named: &NamedType, fields: Vec<(&Field, String)>) -> String {
            let body: Vec<String> = fields
                .into_iter()
                .map(|(f, v)| format!("{}: {}", f.name, v))
                .collect();
            format!("{}{{{}}}", named.name, body.join(", "))
        }

        fn list(&self, _elem: &Type, items: Vec<String>) -> String {
            format!("[{}]", items.join(", "))
        }

        fn set(&self, _elem: &Type, items: Vec<String>) -> String {
            format!("{{{}}}", items.join(", "))
        }

        fn map(&self, _key: &Type, _value: &Type, entries: Vec<(String, String)>) -> String {
            let body: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            format!("{{{}}}", body.join(", "))
        }
    }

    fn program() -> Program {
        let mut program = Program::new("tutorial");
        program
            .enums
            .push(Enum::new("Color").value("RED", 1).value("GREEN", 2));
        program.structs.push(
            Struct::new("Point")
                .field(Field::new(1, "x", Type::I32))
                .field(Field::new(2, "y", Type::I32)),
        );
        program
    }

    fn render(ty: &Type, value: &ConstValue) -> Result<String> {
        render_const_value(&Idl, &program(), ty, value)
    }

    #[test]
    fn test_list_keeps_count_and_order() {
        let value = ConstValue::List(vec![
            ConstValue::Integer(1),
            ConstValue::Integer(2),
            ConstValue::Integer(3),
        ]);
        assert_eq!(render(&Type::list(Type::I32), &value).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_map_keeps_document_order() {
        let value = ConstValue::Map(vec![
            (ConstValue::String("z".into()), ConstValue::Integer(1)),
            (ConstValue::String("a".into()), ConstValue::Integer(2)),
        ]);
        let ty = Type::map(Type::string(), Type::I32);
        assert_eq!(render(&ty, &value).unwrap(), r#"{"z": 1, "a": 2}"#);
    }

    #[test]
    fn test_enum_by_value_and_name() {
        let ty = Type::enum_("Color");
        assert_eq!(render(&ty, &ConstValue::Integer(2)).unwrap(), "Color.GREEN");
        assert_eq!(
            render(&ty, &ConstValue::Identifier("Color.RED".into())).unwrap(),
            "Color.RED"
        );
        assert_eq!(render(&ty, &ConstValue::Integer(7)).unwrap(), "7");
    }

    #[test]
    fn test_unknown_enum_member() {
        let err = render(&Type::enum_("Color"), &ConstValue::Identifier("BLUE".into()))
            .unwrap_err();
        assert!(matches!(err, GenError::UnknownConstant { ident, .. } if ident == "BLUE"));
    }

    #[test]
    fn test_struct_literal_recurses_per_field() {
        let value = ConstValue::Map(vec![
            (ConstValue::String("y".into()), ConstValue::Integer(4)),
            (ConstValue::String("x".into()), ConstValue::Integer(3)),
        ]);
        assert_eq!(
            render(&Type::struct_("Point"), &value).unwrap(),
            "Point{y: 4, x: 3}"
        );
    }

    #[test]
    fn test_struct_literal_unknown_field() {
        let value = ConstValue::Map(vec![(ConstValue::String("z".into()), ConstValue::Integer(1))]);
        let err = render(&Type::struct_("Point"), &value).unwrap_err();
        assert!(err.to_string().contains("has no field 'z'"));
    }

    #[test]
    fn test_void_is_unsupported() {
        let err = render(&Type::Void, &ConstValue::Integer(1)).unwrap_err();
        assert!(matches!(err, GenError::UnsupportedConstType { .. }));
    }

    #[test]
    fn test_shape_mismatch_is_unsupported() {
        let err = render(&Type::list(Type::I32), &ConstValue::Integer(1)).unwrap_err();
        assert!(matches!(err, GenError::UnsupportedConstType { .. }));
        let err = render(&Type::I8, &ConstValue::Integer(300)).unwrap_err();
        assert!(err.to_string().contains("does not fit in i8"));
    }

    #[test]
    fn test_bool_and_typedef() {
        assert_eq!(render(&Type::Bool, &ConstValue::Integer(1)).unwrap(), "true");
        let ty = Type::typedef("Ratio", Type::Double);
        assert_eq!(render(&ty, &ConstValue::Integer(2)).unwrap(), "2.0");
    }

    #[test]
    fn test_non_finite_double_is_unsupported() {
        for d in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = render(&Type::Double, &ConstValue::Double(d)).unwrap_err();
            assert!(err.to_string().contains("no literal form"), "{d}");
        }
        let list = ConstValue::List(vec![ConstValue::Double(1.5), ConstValue::Double(f64::NAN)]);
        assert!(render(&Type::list(Type::Double), &list).is_err());
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("hello"), r#""hello""#);
        assert_eq!(quoted("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quoted("line\nnext\t"), r#""line\nnext\t""#);
        assert_eq!(quoted("\u{1}"), r#""\x01""#);
    }

    #[test]
    fn test_unknown_struct_type() {
        let err = render(&Type::struct_("Missing"), &ConstValue::Map(vec![])).unwrap_err();
        assert!(matches!(err, GenError::UnknownType { name } if name == "Missing"));
    }
}
