//! Structural validation of loaded programs.
//!
//! Runs after includes are resolved. Checks what generators rely on but
//! the document format cannot express: unique names and field keys,
//! valid identifiers, and type references that resolve.

use std::collections::HashMap;

use miette::SourceSpan;
use thriftgen_ast::{Field, Program, Type};

use crate::{Result, SourceContext};

/// Validation context: the document source plus the dotted path of the
/// declaration being checked.
///
/// # Example
///
/// ```ignore
/// let ctx = ValidateContext::new(&source);
/// let nested = ctx.push("Calculator").push("calculate");
/// nested.validate_name("logid", "argument")?;
/// ```
#[derive(Debug, Clone)]
pub(crate) struct ValidateContext<'a> {
    source: &'a SourceContext,
    path: Vec<&'a str>,
}

impl<'a> ValidateContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe a thing for error messages: "field in 'Work'" or just
    /// "field" at the top level.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Span of `name`, searching after the innermost enclosing
    /// declaration so repeated names point at the right occurrence.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        let src = self.source.src();
        let mut from = 0;
        for segment in &self.path {
            if let Some(span) = find_name_span(&src[from..], segment) {
                from += span.offset() + span.len();
            }
        }
        find_name_span(&src[from..], name)
            .map(|span| SourceSpan::from((from + span.offset(), span.len())))
    }

    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }
}

/// Find the span of a quoted name (`"name"`) in the document, falling
/// back to a bare occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let quoted = format!("\"{}\"", name);
    if let Some(pos) = src.find(&quoted) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, name.len())));
    }

    src.find(name).map(|pos| SourceSpan::from((pos, name.len())))
}

/// Returns None if `name` is a valid Thrift identifier, Some(reason)
/// otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        None
    } else {
        Some("name must contain only letters, numbers, and underscores")
    }
}

/// Validate a program whose includes are already resolved.
pub(crate) fn validate_program(program: &Program, source: &SourceContext) -> Result<()> {
    let ctx = ValidateContext::new(source);

    check_names(program, &ctx)?;
    check_duplicate_definitions(program, &ctx)?;

    for def in &program.enums {
        let ctx = ctx.push(&def.name);
        let mut seen: HashMap<&str, ()> = HashMap::new();
        for member in &def.values {
            if seen.insert(&member.name, ()).is_some() {
                return Err(source.validation_error_at(
                    format!("enum '{}' declares '{}' twice", def.name, member.name),
                    ctx.find_span(&member.name),
                ));
            }
        }
    }

    for typedef in &program.typedefs {
        check_type(program, &typedef.target, &ctx.push(&typedef.name), "typedef")?;
    }
    for constant in &program.consts {
        check_type(program, &constant.ty, &ctx.push(&constant.name), "constant")?;
    }
    for def in &program.structs {
        let ctx = ctx.push(&def.name);
        check_fields(program, &def.fields, &ctx, &def.name)?;
    }
    for service in &program.services {
        let service_ctx = ctx.push(&service.name);
        if let Some(parent) = &service.extends
            && program.find_service(parent).is_none()
        {
            return Err(source.unknown_type_error(
                parent.to_string(),
                format!("'extends' of service '{}'", service.name),
                service_ctx.find_span(&parent.name),
            ));
        }

        for function in &service.functions {
            let ctx = service_ctx.push(&function.name);
            let owner = format!("{}.{}", service.name, function.name);
            check_type(program, &function.returns, &ctx, "return type")?;
            check_fields(program, &function.arguments, &ctx, &owner)?;
            check_fields(program, &function.exceptions, &ctx, &format!("{} throws", owner))?;

            for ex in &function.exceptions {
                if !is_exception(program, &ex.ty) {
                    return Err(source.validation_error_at(
                        format!(
                            "'{}' in the throws clause of '{}' is not an exception",
                            ex.name, owner
                        ),
                        ctx.find_span(&ex.name),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn check_names(program: &Program, ctx: &ValidateContext<'_>) -> Result<()> {
    for typedef in &program.typedefs {
        ctx.validate_name(&typedef.name, "typedef")?;
    }
    for def in &program.enums {
        ctx.validate_name(&def.name, "enum")?;
        let nested = ctx.push(&def.name);
        for member in &def.values {
            nested.validate_name(&member.name, "enum member")?;
        }
    }
    for constant in &program.consts {
        ctx.validate_name(&constant.name, "constant")?;
    }
    for def in &program.structs {
        ctx.validate_name(&def.name, "struct")?;
        let nested = ctx.push(&def.name);
        for field in &def.fields {
            nested.validate_name(&field.name, "field")?;
        }
    }
    for service in &program.services {
        ctx.validate_name(&service.name, "service")?;
        let nested = ctx.push(&service.name);
        for function in &service.functions {
            nested.validate_name(&function.name, "function")?;
            let inner = nested.push(&function.name);
            for field in function.arguments.iter().chain(&function.exceptions) {
                inner.validate_name(&field.name, "argument")?;
            }
        }
    }
    Ok(())
}

fn check_duplicate_definitions(program: &Program, ctx: &ValidateContext<'_>) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    let definitions = program
        .typedefs
        .iter()
        .map(|t| (t.name.as_str(), "typedef"))
        .chain(program.enums.iter().map(|e| (e.name.as_str(), "enum")))
        .chain(program.consts.iter().map(|c| (c.name.as_str(), "constant")))
        .chain(program.structs.iter().map(|s| (s.name.as_str(), "struct")))
        .chain(program.services.iter().map(|s| (s.name.as_str(), "service")));

    for (name, kind) in definitions {
        if let Some(first) = seen.insert(name, kind) {
            return Err(ctx.source.validation_error_at(
                format!("{} '{}' is already defined as a {}", kind, name, first),
                ctx.find_span(name),
            ));
        }
    }
    Ok(())
}

fn check_fields(
    program: &Program,
    fields: &[Field],
    ctx: &ValidateContext<'_>,
    owner: &str,
) -> Result<()> {
    let mut keys: HashMap<i16, &str> = HashMap::new();

    for field in fields {
        if let Some(first) = keys.insert(field.key, &field.name) {
            let unknown = SourceSpan::from((0, 0));
            return Err(ctx.source.duplicate_field_key_error(
                owner,
                field.key,
                (first, ctx.find_span(first).unwrap_or(unknown)),
                (&field.name, ctx.find_span(&field.name).unwrap_or(unknown)),
            ));
        }
        check_type(program, &field.ty, &ctx.push(&field.name), "field")?;
    }
    Ok(())
}

fn check_type(program: &Program, ty: &Type, ctx: &ValidateContext<'_>, kind: &str) -> Result<()> {
    match ty {
        Type::Enum(named) if program.find_enum(named).is_none() => {
            Err(ctx.source.unknown_type_error(
                named.to_string(),
                ctx.context_for(kind),
                ctx.find_span(&named.name),
            ))
        }
        Type::Struct(named) | Type::Exception(named) if program.find_struct(named).is_none() => {
            Err(ctx.source.unknown_type_error(
                named.to_string(),
                ctx.context_for(kind),
                ctx.find_span(&named.name),
            ))
        }
        Type::Typedef { target, .. } => check_type(program, target, ctx, kind),
        Type::List { elem } | Type::Set { elem } => check_type(program, elem, ctx, kind),
        Type::Map { key, value } => {
            check_type(program, key, ctx, kind)?;
            check_type(program, value, ctx, kind)
        }
        _ => Ok(()),
    }
}

fn is_exception(program: &Program, ty: &Type) -> bool {
    let mut current = ty;
    while let Type::Typedef { target, .. } = current {
        current = target;
    }
    matches!(current, Type::Exception(named)
        if program.find_struct(named).is_some_and(|s| s.is_exception))
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::{Function, NamedType, Service, Struct};

    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("Work").is_none());
        assert!(validate_identifier("num_1").is_none());
        assert!(validate_identifier("_private").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("my-struct").is_some());
        assert!(validate_identifier("a.b").is_some());
    }

    #[test]
    fn test_find_name_span_prefers_quoted() {
        let src = r#"{"name": "Workload", "structs": [{"name": "Work"}]}"#;
        let span = find_name_span(src, "Work").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "Work");
        assert_eq!(span.offset(), src.find("\"Work\"").unwrap() + 1);
    }

    #[test]
    fn test_find_span_after_path() {
        let src = r#"{"a": {"name": "x"}, "B": {"name": "x"}}"#;
        let source = SourceContext::new(src, "t.json");
        let ctx = ValidateContext::new(&source).push("B");
        let span = ctx.find_span("x").unwrap();
        assert_eq!(span.offset(), src.rfind("\"x\"").unwrap() + 1);
    }

    fn source() -> SourceContext {
        SourceContext::new("{}", "test.json")
    }

    #[test]
    fn test_duplicate_field_key() {
        let mut program = Program::new("t");
        program.structs.push(
            Struct::new("Work")
                .field(Field::new(1, "num1", Type::I32))
                .field(Field::new(1, "num2", Type::I32)),
        );

        let err = validate_program(&program, &source()).unwrap_err();
        assert!(matches!(*err, crate::Error::DuplicateFieldKey { key: 1, .. }));
    }

    #[test]
    fn test_unknown_type() {
        let mut program = Program::new("t");
        program
            .structs
            .push(Struct::new("Work").field(Field::new(1, "w", Type::struct_("Wrok"))));

        let err = validate_program(&program, &source()).unwrap_err();
        assert!(err.to_string().contains("unknown type 'Wrok'"));
    }

    #[test]
    fn test_unknown_parent_service() {
        let mut program = Program::new("t");
        program
            .services
            .push(Service::new("Calculator").extends(NamedType::external("shared", "Base")));

        let err = validate_program(&program, &source()).unwrap_err();
        assert!(err.to_string().contains("shared.Base"));
    }

    #[test]
    fn test_throws_must_be_exception() {
        let mut program = Program::new("t");
        program.structs.push(Struct::new("NotAnError"));
        program.services.push(Service::new("Calculator").function(
            Function::new("calculate", Type::I32)
                .throws(Field::new(1, "ouch", Type::Exception(NamedType::local("NotAnError")))),
        ));

        let err = validate_program(&program, &source()).unwrap_err();
        assert!(err.to_string().contains("is not an exception"));
    }

    #[test]
    fn test_duplicate_definition() {
        let mut program = Program::new("t");
        program.structs.push(Struct::new("Work"));
        program.services.push(Service::new("Work"));

        let err = validate_program(&program, &source()).unwrap_err();
        assert!(err.to_string().contains("already defined as a struct"));
    }
}
