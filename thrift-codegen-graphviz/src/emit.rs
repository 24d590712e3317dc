//! Dot emitter.
//!
//! Every declaration becomes a record node whose label lists its members;
//! fields, parameters and return values get ports so edges start at the
//! member that references another type. Services are clusters of function
//! nodes. Edges are collected during the walk and written after the last
//! cluster, so nodes first named by an edge stay outside every cluster.

use thriftgen_ast::{
    Const, Enum, Field, Function, NamedType, Program, Service, Struct, Type, Typedef,
};
use thriftgen_codegen::{
    Result,
    builder::CodeBuilder,
    classify::{Category, classify},
    driver::ProgramVisitor,
    language::TypeMapper,
    value::{quoted, render_const_value},
};
use tracing::trace;

use crate::{options::GvOptions, syntax::GvSyntax, type_mapper::GvTypeMapper};

pub(crate) struct GvEmitter<'a> {
    program: &'a Program,
    options: &'a GvOptions,
    mapper: &'a GvTypeMapper,
    out: CodeBuilder,
    edges: Vec<String>,
}

impl<'a> GvEmitter<'a> {
    pub fn new(program: &'a Program, options: &'a GvOptions, mapper: &'a GvTypeMapper) -> Self {
        Self {
            program,
            options,
            mapper,
            out: CodeBuilder::javascript(),
            edges: Vec::new(),
        }
    }

    pub fn into_source(self) -> String {
        self.out.build()
    }

    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_line(s.as_ref());
    }

    fn node(&mut self, id: &str, label: &[String], color: &str) {
        self.line(format!(
            "{} [label=\"{}\", fillcolor={}];",
            quoted(id),
            label.join("|"),
            color
        ));
    }

    /// Node id of a named declaration.
    fn target(&self, named: &NamedType) -> String {
        quoted(&self.mapper.qualified(named.program.as_deref(), &named.name))
    }

    /// One edge from `source` to every declaration `ty` mentions.
    fn edges_to(&mut self, source: &str, ty: &Type, attributes: &str) {
        let mut named = Vec::new();
        referenced(ty, &mut named);
        for target in named {
            let edge = format!("{} -> {}{};", source, self.target(target), attributes);
            self.edges.push(edge);
        }
    }

    /// `<port>name :: type` entries of a field list, plus their edges.
    fn members(&mut self, node: &str, port: &str, fields: &[Field]) -> Vec<String> {
        let mut entries = Vec::with_capacity(fields.len());
        for field in fields {
            let port = format!("{}_{}", port, field.name);
            let qualifier = if field.requiredness.is_required() {
                "required "
            } else if field.requiredness.is_optional() {
                "optional "
            } else {
                ""
            };
            entries.push(format!(
                "<{}>{}{} :: {}",
                port,
                qualifier,
                field.name,
                escape_label(&self.mapper.type_name(&field.ty))
            ));
            self.edges_to(&format!("{}:{}", quoted(node), port), &field.ty, "");
        }
        entries
    }

    fn function(&mut self, service: &Service, function: &Function) {
        let id = format!("{}.{}", service.name, function.name);
        let keyword = if function.oneway {
            "oneway function"
        } else {
            "function"
        };

        let mut label = vec![format!(
            "<return_type>{} {} :: {}",
            keyword,
            function.name,
            escape_label(&self.mapper.type_name(&function.returns))
        )];
        label.extend(self.members(&id, "param", &function.arguments));
        self.node(&id, &label, "bisque");

        self.edges_to(
            &format!("{}:return_type", quoted(&id)),
            &function.returns,
            "",
        );
        if self.options.exceptions {
            for exception in &function.exceptions {
                self.edges_to(&quoted(&id), &exception.ty, " [style=dashed]");
            }
        }
    }
}

impl ProgramVisitor for GvEmitter<'_> {
    fn begin(&mut self, program: &Program) -> Result<()> {
        self.out.push_line(&format!("digraph {} {{", quoted(&program.name))).push_indent();
        self.line("graph [rankdir=LR];");
        self.line("node [style=filled, shape=record];");
        self.line("edge [arrowsize=0.5];");
        Ok(())
    }

    fn visit_typedef(&mut self, def: &Typedef) -> Result<()> {
        let label = [
            format!("typedef {}", def.name),
            escape_label(&self.mapper.type_name(&def.target)),
        ];
        self.node(&def.name, &label, "azure");
        self.edges_to(&quoted(&def.name), &def.target, "");
        Ok(())
    }

    fn visit_enum(&mut self, def: &Enum) -> Result<()> {
        let mut label = vec![format!("enum {}", def.name)];
        label.extend(
            def.values
                .iter()
                .map(|v| format!("<{}>{} = {}", v.name, v.name, v.value)),
        );
        self.node(&def.name, &label, "white");
        Ok(())
    }

    fn visit_consts(&mut self, consts: &[Const]) -> Result<()> {
        let syntax = GvSyntax {
            mapper: self.mapper,
        };
        for constant in consts {
            let value = render_const_value(&syntax, self.program, &constant.ty, &constant.value)?;
            let id = format!("const_{}", constant.name);
            let label = [
                format!(
                    "const {} :: {}",
                    constant.name,
                    escape_label(&self.mapper.type_name(&constant.ty))
                ),
                escape_label(&value),
            ];
            self.node(&id, &label, "aliceblue");
            self.edges_to(&quoted(&id), &constant.ty, "");
        }
        Ok(())
    }

    fn visit_struct(&mut self, def: &Struct) -> Result<()> {
        let (keyword, color) = if def.is_exception {
            ("exception", "lightpink")
        } else if def.is_union {
            ("union", "khaki")
        } else {
            ("struct", "beige")
        };
        trace!(name = %def.name, keyword, "struct node");

        let mut label = vec![format!("{} {}", keyword, def.name)];
        label.extend(self.members(&def.name, "field", &def.fields));
        self.node(&def.name, &label, color);
        Ok(())
    }

    fn visit_service(&mut self, service: &Service) -> Result<()> {
        self.out
            .push_blank()
            .push_line(&format!("subgraph {} {{", quoted(&format!("cluster_{}", service.name))))
            .push_indent();
        self.line(format!("label={};", quoted(&format!("service {}", service.name))));
        self.line("style=dashed;");
        self.node(&service.name, &[format!("service {}", service.name)], "bisque");

        if let Some(parent) = &service.extends {
            let edge = format!(
                "{} -> {} [style=bold];",
                quoted(&service.name),
                self.target(parent)
            );
            self.edges.push(edge);
        }
        for function in &service.functions {
            self.function(service, function);
        }
        self.out.push_dedent().push_line("}");
        Ok(())
    }

    fn finish(&mut self, _program: &Program) -> Result<()> {
        if !self.edges.is_empty() {
            self.out.push_blank();
        }
        for edge in std::mem::take(&mut self.edges) {
            self.line(edge);
        }
        self.out.push_dedent().push_line("}");
        Ok(())
    }
}

/// Named declarations reachable from `ty` through containers.
fn referenced<'t>(ty: &'t Type, out: &mut Vec<&'t NamedType>) {
    match classify(ty) {
        Category::Enum(named) | Category::Struct(named) | Category::Exception(named) => {
            out.push(named)
        }
        Category::List(elem) | Category::Set(elem) => referenced(elem, out),
        Category::Map(key, value) => {
            referenced(key, out);
            referenced(value, out);
        }
        Category::Void | Category::Base(_) => {}
    }
}

/// Escape record-label metacharacters.
fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
