//! JavaScript emitters.
//!
//! The walk writes `<program>_types.js`; every service is rendered into
//! its own buffer and becomes `<Service>.js`. In node mode declarations
//! are CommonJS exports. In browser mode they are globals, or members of
//! the program's `js` namespace object when it declares one.

mod codec;
mod services;
mod structs;

use thriftgen_ast::{Const, Enum, Program, Service, Struct};
use thriftgen_codegen::{
    Result, builder::CodeBuilder, driver::ProgramVisitor, language::PreviewFile,
    value::{quoted, render_const_value},
};
use thriftgen_core::GENERATOR_NAME;
use tracing::trace;

use crate::{
    naming::JS_NAMING, options::JsOptions, syntax::JsSyntax, type_mapper::JsTypeMapper,
};

/// File and module layout of one program's output.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    /// Module name of the types file, without extension.
    pub types_module: String,
    /// `require`d modules of included programs: (binding, path).
    pub requires: Vec<(String, String)>,
    /// Namespace object declarations live in (browser) or are mirrored to
    /// (node with `with_ns`).
    pub namespace: Option<String>,
}

/// How a top-level declaration is exported in node mode.
#[derive(Debug, Clone, Copy)]
enum Export<'n> {
    /// `module.exports.<Name>`
    Module,
    /// Not exported.
    Private,
    /// `exports.<alias>`
    As(&'n str),
}

pub(crate) struct JsEmitter<'a> {
    program: &'a Program,
    options: &'a JsOptions,
    layout: &'a Layout,
    /// Name resolution inside the types file.
    types: &'a JsTypeMapper,
    /// Name resolution inside service files.
    services: &'a JsTypeMapper,
    in_service: bool,
    out: CodeBuilder,
    temp: usize,
    service_files: Vec<PreviewFile>,
}

impl<'a> JsEmitter<'a> {
    pub fn new(
        program: &'a Program,
        options: &'a JsOptions,
        layout: &'a Layout,
        types: &'a JsTypeMapper,
        services: &'a JsTypeMapper,
    ) -> Self {
        Self {
            program,
            options,
            layout,
            types,
            services,
            in_service: false,
            out: CodeBuilder::javascript(),
            temp: 0,
            service_files: Vec::new(),
        }
    }

    /// The types file followed by one file per service.
    pub fn into_files(self) -> Vec<PreviewFile> {
        let mut files = vec![PreviewFile::new(
            format!("{}.js", self.layout.types_module),
            self.out.build(),
        )];
        files.extend(self.service_files);
        files
    }

    fn mapper(&self) -> &'a JsTypeMapper {
        if self.in_service {
            self.services
        } else {
            self.types
        }
    }

    fn syntax(&self) -> JsSyntax<'a> {
        JsSyntax {
            mapper: self.mapper(),
            node: self.options.node,
        }
    }

    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_line(s.as_ref());
    }

    fn blank(&mut self) {
        self.out.push_blank();
    }

    fn open(&mut self, s: impl AsRef<str>) {
        self.out.push_line(s.as_ref()).push_indent();
    }

    fn close(&mut self, s: impl AsRef<str>) {
        self.out.push_dedent().push_line(s.as_ref());
    }

    fn doc(&mut self, doc: Option<&str>) {
        if let Some(doc) = doc {
            self.out.push_doc_block(doc);
        }
    }

    fn fresh(&mut self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.temp);
        self.temp += 1;
        name
    }

    /// Left-hand side binding a top-level declaration.
    fn declare(&self, name: &str, export: Export<'_>) -> String {
        if self.options.node {
            match export {
                Export::Module => format!("const {} = module.exports.{} = ", name, name),
                Export::Private => format!("const {} = ", name),
                Export::As(alias) => format!("const {} = exports.{} = ", name, alias),
            }
        } else {
            match &self.layout.namespace {
                Some(ns) => format!("{}.{} = ", ns, name),
                None => format!("var {} = ", name),
            }
        }
    }

    /// Binding of a class declared in the file being written.
    fn local_class(&self, name: &str) -> String {
        if self.options.node {
            name.to_string()
        } else {
            self.types.qualify(None, name)
        }
    }

    fn header(&mut self) {
        self.line("//");
        self.line(format!("// Autogenerated by {}", GENERATOR_NAME));
        self.line("//");
        self.line("// DO NOT EDIT UNLESS YOU ARE SURE THAT YOU KNOW WHAT YOU ARE DOING");
        self.line("//");
        if self.options.node {
            self.line("\"use strict\";");
            self.blank();
            self.line("const thrift = require(\"thrift\");");
            self.line("const Thrift = thrift.Thrift;");
        }
        self.namespace_objects();
    }

    /// Create the namespace object chain when output goes there.
    fn namespace_objects(&mut self) {
        let Some(namespace) = self.layout.namespace.clone() else {
            return;
        };
        if self.options.node && !self.options.with_ns {
            return;
        }

        self.blank();
        let root = if self.options.node { "global." } else { "" };
        let mut path = String::new();
        for segment in namespace.split('.') {
            if path.is_empty() {
                path = segment.to_string();
                if self.options.node {
                    self.line(format!("{root}{path} = {root}{path} || {{}};"));
                } else {
                    self.line(format!("var {path} = {path} || {{}};"));
                }
            } else {
                path = format!("{}.{}", path, segment);
                self.line(format!("{root}{path} = {root}{path} || {{}};"));
            }
        }
    }

    /// Node requires of the types file's dependencies.
    fn requires(&mut self) {
        if !self.options.node || self.layout.requires.is_empty() {
            return;
        }
        self.blank();
        let layout = self.layout;
        for (binding, path) in &layout.requires {
            self.line(format!("const {} = require(\"{}\");", binding, path));
        }
    }

    fn emit_enum(&mut self, def: &Enum) {
        let name = JS_NAMING.type_name(&def.name);
        let lhs = self.declare(&name, Export::Module);

        self.blank();
        self.doc(def.doc.as_deref());
        self.open(format!("{}{{", lhs));
        for member in &def.values {
            self.line(format!("{}: {},", quoted(&member.name), member.value));
        }
        self.close("};");
    }

    /// Constants go after the classes so struct literals can use them.
    fn emit_consts(&mut self) -> Result<()> {
        let syntax = self.syntax();
        let program = self.program;
        for constant in &program.consts {
            let value = render_const_value(&syntax, program, &constant.ty, &constant.value)?;
            let lhs = self.declare(&JS_NAMING.safe_name(&constant.name), Export::Module);
            self.blank();
            self.doc(constant.doc.as_deref());
            self.line(format!("{}{};", lhs, value));
        }
        Ok(())
    }

    /// Mirror node exports onto the global namespace objects.
    fn publish(&mut self, names: &[String]) {
        if !(self.options.node && self.options.with_ns) {
            return;
        }
        let Some(namespace) = self.layout.namespace.clone() else {
            return;
        };
        self.blank();
        if names.is_empty() {
            self.line(format!("Object.assign(global.{}, module.exports);", namespace));
        } else {
            for name in names {
                self.line(format!("global.{}.{} = {};", namespace, name, name));
            }
        }
    }
}

impl ProgramVisitor for JsEmitter<'_> {
    fn begin(&mut self, _program: &Program) -> Result<()> {
        self.header();
        self.requires();
        Ok(())
    }

    fn visit_enum(&mut self, def: &Enum) -> Result<()> {
        self.emit_enum(def);
        Ok(())
    }

    fn visit_consts(&mut self, consts: &[Const]) -> Result<()> {
        trace!(count = consts.len(), "constants deferred to end of file");
        Ok(())
    }

    fn visit_struct(&mut self, def: &Struct) -> Result<()> {
        self.emit_struct(def, Default::default(), Export::Module)
    }

    fn visit_service(&mut self, service: &Service) -> Result<()> {
        let types = std::mem::replace(&mut self.out, CodeBuilder::javascript());
        self.in_service = true;
        let rendered = self.emit_service(service);
        self.in_service = false;
        let service_out = std::mem::replace(&mut self.out, types);
        rendered?;

        let path = format!("{}.js", JS_NAMING.file_name(&service.name));
        self.service_files
            .push(PreviewFile::new(path, service_out.build()));
        Ok(())
    }

    fn finish(&mut self, _program: &Program) -> Result<()> {
        self.emit_consts()?;
        self.publish(&[]);
        Ok(())
    }
}
