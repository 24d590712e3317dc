//! Struct, union and exception classes.

use thriftgen_ast::{Field, Struct};
use thriftgen_codegen::{
    Result,
    plan::{ReadPlan, UnknownFields, WriteMode, WritePlan},
    value::{quoted, render_const_value},
};

use super::{Export, JsEmitter};
use crate::naming::JS_NAMING;

impl JsEmitter<'_> {
    pub(super) fn emit_struct(
        &mut self,
        def: &Struct,
        mode: WriteMode,
        export: Export<'_>,
    ) -> Result<()> {
        let name = JS_NAMING.type_name(&def.name);
        let lhs = self.declare(&name, export);
        let extends = if def.is_exception {
            " extends Thrift.TException"
        } else {
            ""
        };

        self.blank();
        self.doc(def.doc.as_deref());
        self.open(format!("{}class{} {{", lhs, extends));
        self.constructor(def)?;
        self.blank();
        self.reader(&ReadPlan::new(def, self.options.unknown_fields));
        self.blank();
        self.validator(def);
        self.blank();
        self.writer(&WritePlan::new(def, mode));
        self.close("};");
        Ok(())
    }

    /// Defaults first, then whatever `args` supplies.
    fn constructor(&mut self, def: &Struct) -> Result<()> {
        let syntax = self.syntax();

        self.open("constructor(args) {");
        if def.is_exception {
            self.line("super(args);");
            self.line(format!("this.name = {};", quoted(&def.name)));
        }
        for field in &def.fields {
            let value = match &field.default {
                Some(value) => render_const_value(&syntax, self.program, &field.ty, value)?,
                None => "null".to_string(),
            };
            self.doc(field.doc.as_deref());
            self.line(format!("{} = {};", member(field), value));
        }
        if !def.fields.is_empty() {
            self.open("if (args) {");
            for field in &def.fields {
                let arg = format!("args.{}", field.name);
                self.open(format!(
                    "if ({} !== undefined && {} !== null) {{",
                    arg, arg
                ));
                self.line(format!("{} = {};", member(field), arg));
                self.close("}");
            }
            self.close("}");
        }
        self.close("}");
        Ok(())
    }

    fn reader(&mut self, plan: &ReadPlan<'_>) {
        self.open("read(input) {");
        self.line("input.readStructBegin();");
        self.open("while (true) {");
        self.line("const ret = input.readFieldBegin();");
        self.line("const ftype = ret.ftype;");
        self.line("const fid = ret.fid;");
        self.open("if (ftype == Thrift.Type.STOP) {");
        self.line("break;");
        self.close("}");

        self.open("switch (fid) {");
        for read in plan.fields() {
            self.line(format!("case {}:", read.field.key));
            self.out.push_indent();
            self.open(format!("if (ftype == Thrift.Type.{}) {{", read.wire));
            self.read_value(&read.field.ty, &member(read.field));
            self.out.push_dedent();
            self.open("} else {");
            self.line("input.skip(ftype);");
            self.close("}");
            self.line("break;");
            self.out.push_dedent();
        }
        self.line("default:");
        self.out.push_indent();
        match plan.unknown_fields() {
            UnknownFields::Skip => self.line("input.skip(ftype);"),
            UnknownFields::Reject => self.line(format!(
                "throw new Thrift.TProtocolException(Thrift.TProtocolExceptionType.INVALID_DATA, \"Unknown field id \" + fid + \" in {}\");",
                plan.struct_name()
            )),
        }
        self.out.push_dedent();
        self.close("}");

        self.line("input.readFieldEnd();");
        self.close("}");
        self.line("input.readStructEnd();");
        self.line("this.validate();");
        self.close("}");
    }

    /// Throws when a required field is missing.
    fn validator(&mut self, def: &Struct) {
        self.open("validate() {");
        for field in def.fields.iter().filter(|f| f.requiredness.is_required()) {
            let this = member(field);
            self.open(format!("if ({} === null || {} === undefined) {{", this, this));
            self.line(format!(
                "throw new Thrift.TProtocolException(Thrift.TProtocolExceptionType.INVALID_DATA, \"Required field {} is unset!\");",
                field.name
            ));
            self.close("}");
        }
        self.close("}");
    }

    /// Every field is null-guarded; result structs chain the guards so at
    /// most one field is written.
    fn writer(&mut self, plan: &WritePlan<'_>) {
        self.open("write(output) {");
        self.line(format!(
            "output.writeStructBegin({});",
            quoted(plan.struct_name())
        ));

        for (i, write) in plan.fields().iter().enumerate() {
            let field = write.field;
            let this = member(field);
            let guard = format!("{} !== null && {} !== undefined", this, this);

            if i > 0 && plan.mode() == WriteMode::Exclusive {
                self.out.push_dedent();
                self.open(format!("}} else if ({}) {{", guard));
            } else {
                self.open(format!("if ({}) {{", guard));
            }
            self.line(format!(
                "output.writeFieldBegin({}, Thrift.Type.{}, {});",
                quoted(&field.name),
                write.wire,
                field.key
            ));
            self.write_value(&field.ty, &this);
            self.line("output.writeFieldEnd();");
            if plan.mode() == WriteMode::Sequential {
                self.close("}");
            }
        }
        if plan.mode() == WriteMode::Exclusive && !plan.fields().is_empty() {
            self.close("}");
        }

        self.line("output.writeFieldStop();");
        self.line("output.writeStructEnd();");
        self.close("}");
    }
}

/// `this.<field>`
fn member(field: &Field) -> String {
    format!("this.{}", field.name)
}
