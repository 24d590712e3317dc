//! Cross-program references.

use indexmap::IndexSet;
use thriftgen_ast::{Field, Program, Type};

/// Names of the other programs that `program`'s declarations refer to, in
/// order of first reference.
///
/// Backends import exactly these rather than every declared include.
pub fn foreign_programs(program: &Program) -> Vec<String> {
    let mut found = IndexSet::new();
    let current = program.name.as_str();

    for typedef in &program.typedefs {
        collect(&typedef.target, current, &mut found);
    }
    for constant in &program.consts {
        collect(&constant.ty, current, &mut found);
    }
    for def in &program.structs {
        collect_fields(&def.fields, current, &mut found);
    }
    for service in &program.services {
        if let Some(parent) = &service.extends
            && let Some(p) = parent.foreign_program(current)
        {
            found.insert(p.to_string());
        }
        for function in &service.functions {
            collect(&function.returns, current, &mut found);
            collect_fields(&function.arguments, current, &mut found);
            collect_fields(&function.exceptions, current, &mut found);
        }
    }

    found.into_iter().collect()
}

fn collect_fields(fields: &[Field], current: &str, found: &mut IndexSet<String>) {
    for field in fields {
        collect(&field.ty, current, found);
    }
}

fn collect(ty: &Type, current: &str, found: &mut IndexSet<String>) {
    match ty {
        Type::Enum(n) | Type::Struct(n) | Type::Exception(n) => {
            if let Some(p) = n.foreign_program(current) {
                found.insert(p.to_string());
            }
        }
        Type::Typedef {
            program, target, ..
        } => {
            if let Some(p) = program.as_deref().filter(|p| *p != current) {
                found.insert(p.to_string());
            } else {
                collect(target, current, found);
            }
        }
        Type::List { elem } | Type::Set { elem } => collect(elem, current, found),
        Type::Map { key, value } => {
            collect(key, current, found);
            collect(value, current, found);
        }
        _ => {}
    }
}
