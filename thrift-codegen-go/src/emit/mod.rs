//! Go emitters.
//!
//! One [`GoEmitter`] renders one program into a single Go source file. The
//! declaration kinds live in their own modules; this one holds the file
//! header and the small helpers they share.

mod codec;
mod consts;
mod enums;
mod services;
mod structs;

use thriftgen_ast::{Const, Enum, Program, Service, Struct, Typedef};
use thriftgen_codegen::{
    Result, builder::CodeBuilder, driver::ProgramVisitor, generation::ImportCollector,
};
use thriftgen_core::GENERATOR_NAME;

use crate::{
    options::{GoOptions, GoPackage},
    syntax::GoSyntax,
    type_mapper::GoTypeMapper,
};

/// Accumulates the Go source of one program.
pub(crate) struct GoEmitter<'a> {
    program: &'a Program,
    options: &'a GoOptions,
    mapper: &'a GoTypeMapper,
    imports: &'a ImportCollector,
    package: &'a GoPackage,
    out: CodeBuilder,
    temp: usize,
}

impl<'a> GoEmitter<'a> {
    pub fn new(
        program: &'a Program,
        options: &'a GoOptions,
        mapper: &'a GoTypeMapper,
        imports: &'a ImportCollector,
        package: &'a GoPackage,
    ) -> Self {
        Self {
            program,
            options,
            mapper,
            imports,
            package,
            out: CodeBuilder::go(),
            temp: 0,
        }
    }

    pub fn into_source(self) -> String {
        self.out.build()
    }

    fn syntax(&self) -> GoSyntax<'a> {
        GoSyntax {
            mapper: self.mapper,
            program: self.program,
        }
    }

    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_line(s.as_ref());
    }

    fn blank(&mut self) {
        self.out.push_blank();
    }

    /// Line ending in `{`, then indent.
    fn open(&mut self, s: impl AsRef<str>) {
        self.out.push_line(s.as_ref()).push_indent();
    }

    /// Dedent, then the closing line.
    fn close(&mut self, s: impl AsRef<str>) {
        self.out.push_dedent().push_line(s.as_ref());
    }

    fn doc(&mut self, doc: Option<&str>) {
        if let Some(doc) = doc {
            self.out.push_comment("//", doc);
        }
    }

    /// A local variable name unique within the file.
    fn fresh(&mut self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.temp);
        self.temp += 1;
        name
    }

    fn header(&mut self) {
        let program = self.program;
        let imports = self.imports;

        self.line(format!(
            "// Code generated by {}. DO NOT EDIT.",
            GENERATOR_NAME
        ));
        self.blank();
        self.doc(program.doc.as_deref());
        self.line(format!("package {}", self.package.name));
        self.blank();

        // Standard library imports carry no alias; the runtime and other
        // programs' packages always do.
        let (std, external): (Vec<_>, Vec<_>) =
            imports.iter().partition(|(_, aliases)| aliases.is_empty());

        self.open("import (");
        for (module, _) in &std {
            self.line(format!("\"{}\"", module));
        }
        if !std.is_empty() && !external.is_empty() {
            self.blank();
        }
        for (module, aliases) in &external {
            if let Some(alias) = aliases.first() {
                self.line(format!("{} \"{}\"", alias, module));
            }
        }
        self.close(")");
        self.blank();

        self.line("// Keep every import used, whatever the program declares.");
        self.line("var _ = thrift.ZERO");
        self.line("var _ = fmt.Printf");
        self.line("var _ = context.Background");
        if self.options.log_unexpected {
            self.line("var _ = log.Printf");
        }
    }
}

impl ProgramVisitor for GoEmitter<'_> {
    fn begin(&mut self, _program: &Program) -> Result<()> {
        self.header();
        Ok(())
    }

    fn visit_typedef(&mut self, typedef: &Typedef) -> Result<()> {
        self.blank();
        self.emit_typedef(typedef);
        Ok(())
    }

    fn visit_enum(&mut self, def: &Enum) -> Result<()> {
        self.blank();
        self.emit_enum(def);
        Ok(())
    }

    fn visit_consts(&mut self, consts: &[Const]) -> Result<()> {
        self.emit_consts(consts)
    }

    fn visit_struct(&mut self, def: &Struct) -> Result<()> {
        self.emit_struct(def, Default::default())
    }

    fn visit_service(&mut self, service: &Service) -> Result<()> {
        self.emit_service(service)
    }
}
