//! Structs, exceptions and unions.
//!
//! Each definition becomes a Go struct with a constructor applying the
//! declared defaults, getters, `IsSet` predicates for fields that may be
//! absent, and the `Read`/`Write` pair driven by the read and write plans.

use thriftgen_ast::{Field, Struct};
use thriftgen_codegen::{
    Result,
    classify::WireType,
    plan::{Presence, ReadPlan, UnknownFields, WriteMode, WritePlan},
    value::render_const_value,
};

use super::GoEmitter;
use crate::{
    naming::{GO_NAMING, GoScope, key_suffix, member_name},
    type_mapper::{check_supported, is_boxed},
};

/// A field as the Go struct stores it.
struct Member<'f> {
    field: &'f Field,
    name: String,
    /// Declared Go type, a pointer when boxed.
    ty: String,
    wire: WireType,
    presence: Presence,
    boxed: bool,
    suffix: String,
}

impl Member<'_> {
    fn is_optional(&self) -> bool {
        self.presence == Presence::IfSet
    }

    /// Expression holding the field's value for the writer.
    fn value_expr(&self) -> String {
        if self.boxed {
            format!("*p.{}", self.name)
        } else {
            format!("p.{}", self.name)
        }
    }
}

impl GoEmitter<'_> {
    pub(super) fn emit_struct(&mut self, def: &Struct, mode: WriteMode) -> Result<()> {
        for field in &def.fields {
            check_supported(field)?;
        }

        let name = GO_NAMING.type_name(&def.name);
        let write_plan = WritePlan::new(def, mode);
        let read_plan = ReadPlan::new(def, self.options.unknown_fields);
        let members: Vec<Member<'_>> = write_plan
            .fields()
            .iter()
            .map(|wf| Member {
                field: wf.field,
                name: member_name(&wf.field.name),
                ty: self.mapper.field_type(wf.field, wf.presence),
                wire: wf.wire,
                presence: wf.presence,
                boxed: is_boxed(&wf.field.ty, wf.presence),
                suffix: key_suffix(wf.field.key),
            })
            .collect();

        let mut scope = GoScope::new();
        for member in &members {
            scope.declare(&member.field.name, member.name.as_str())?;
        }

        self.blank();
        self.declaration(def, &name, &members);
        self.constructor(&name, &members)?;
        self.accessors(&name, &members)?;
        self.reader(&name, &read_plan, &members);
        for member in &members {
            self.read_field(&name, member);
        }
        self.writer(&name, def, mode, &members);
        for member in &members {
            self.write_field(&name, member);
        }
        self.stringer(&name, def.is_exception);
        Ok(())
    }

    fn declaration(&mut self, def: &Struct, name: &str, members: &[Member<'_>]) {
        self.doc(def.doc.as_deref());
        self.open(format!("type {} struct {{", name));
        for member in members {
            let field = member.field;
            let required = if field.requiredness.is_required() {
                ",required"
            } else {
                ""
            };
            let omit = if member.is_optional() { ",omitempty" } else { "" };

            self.doc(field.doc.as_deref());
            self.line(format!(
                "{} {} `thrift:\"{},{}{}\" json:\"{}{}\"`",
                member.name, member.ty, field.name, field.key, required, field.name, omit
            ));
        }
        self.close("}");
        self.blank();
    }

    fn constructor(&mut self, name: &str, members: &[Member<'_>]) -> Result<()> {
        let syntax = self.syntax();
        let mut defaults = Vec::new();
        for member in members {
            let Some(value) = &member.field.default else {
                continue;
            };
            let rendered = render_const_value(&syntax, self.program, &member.field.ty, value)?;
            let rendered = if member.boxed {
                format!("{}({})", self.mapper.pointer_helper(&member.field.ty), rendered)
            } else {
                rendered
            };
            defaults.push((member.name.clone(), rendered));
        }

        self.open(format!("func New{}() *{} {{", name, name));
        if defaults.is_empty() {
            self.line(format!("return &{}{{}}", name));
        } else {
            self.open(format!("return &{}{{", name));
            for (member, value) in defaults {
                self.line(format!("{}: {},", member, value));
            }
            self.close("}");
        }
        self.close("}");
        self.blank();
        Ok(())
    }

    /// Getters for every field; optional fields fall back to a package
    /// level `<Struct>_<Field>_DEFAULT`.
    fn accessors(&mut self, name: &str, members: &[Member<'_>]) -> Result<()> {
        let syntax = self.syntax();

        for member in members {
            let value_type = member.ty.trim_start_matches('*');
            let value_type = if member.boxed {
                value_type.to_string()
            } else {
                member.ty.clone()
            };

            if !member.is_optional() {
                self.open(format!(
                    "func (p *{}) Get{}() {} {{",
                    name, member.name, value_type
                ));
                self.line(format!("return p.{}", member.name));
                self.close("}");
                self.blank();
                continue;
            }

            let default_var = format!("{}_{}_DEFAULT", name, member.name);
            match &member.field.default {
                Some(value) => {
                    let rendered =
                        render_const_value(&syntax, self.program, &member.field.ty, value)?;
                    self.line(format!("var {} {} = {}", default_var, value_type, rendered));
                }
                None => self.line(format!("var {} {}", default_var, value_type)),
            }
            self.blank();

            self.open(format!(
                "func (p *{}) Get{}() {} {{",
                name, member.name, value_type
            ));
            self.open(format!("if !p.IsSet{}() {{", member.name));
            self.line(format!("return {}", default_var));
            self.close("}");
            self.line(format!("return {}", member.value_expr()));
            self.close("}");
            self.blank();

            self.open(format!("func (p *{}) IsSet{}() bool {{", name, member.name));
            self.line(format!("return p.{} != nil", member.name));
            self.close("}");
            self.blank();
        }
        Ok(())
    }

    fn reader(&mut self, name: &str, plan: &ReadPlan<'_>, members: &[Member<'_>]) {
        self.open(format!(
            "func (p *{}) Read(ctx context.Context, iprot thrift.TProtocol) error {{",
            name
        ));
        self.open("if _, err := iprot.ReadStructBegin(ctx); err != nil {");
        self.line("return thrift.PrependError(fmt.Sprintf(\"%T read error: \", p), err)");
        self.close("}");
        self.blank();

        let required: Vec<&Member<'_>> = members
            .iter()
            .filter(|m| m.field.requiredness.is_required())
            .collect();
        for member in &required {
            self.line(format!("var isset{} bool = false", member.name));
        }
        if !required.is_empty() {
            self.blank();
        }

        self.open("for {");
        self.line("_, fieldTypeId, fieldId, err := iprot.ReadFieldBegin(ctx)");
        self.open("if err != nil {");
        self.line(
            "return thrift.PrependError(fmt.Sprintf(\"%T field %d read error: \", p, fieldId), err)",
        );
        self.close("}");
        self.open("if fieldTypeId == thrift.STOP {");
        self.line("break");
        self.close("}");

        self.line("switch fieldId {");
        for read in plan.fields() {
            let Some(member) = members.iter().find(|m| m.field.key == read.field.key) else {
                continue;
            };
            self.line(format!("case {}:", read.field.key));
            self.out.push_indent();
            self.open(format!("if fieldTypeId == thrift.{} {{", read.wire));
            self.open(format!(
                "if err := p.ReadField{}(ctx, iprot); err != nil {{",
                member.suffix
            ));
            self.line("return err");
            self.close("}");
            if read.is_required() {
                self.line(format!("isset{} = true", member.name));
            }
            self.out.push_dedent();
            self.open("} else {");
            self.skip_field("field %d has unexpected type %v", "fieldId, fieldTypeId");
            self.close("}");
            self.out.push_dedent();
        }
        self.line("default:");
        self.out.push_indent();
        match plan.unknown_fields() {
            UnknownFields::Skip => self.skip_field("skipping unknown field %d", "fieldId"),
            UnknownFields::Reject => self.line(
                "return thrift.NewTProtocolExceptionWithType(thrift.INVALID_DATA, \
                 fmt.Errorf(\"%T: unknown field id %d\", p, fieldId))",
            ),
        }
        self.out.push_dedent();
        self.line("}");

        self.open("if err := iprot.ReadFieldEnd(ctx); err != nil {");
        self.line("return err");
        self.close("}");
        self.close("}");

        self.open("if err := iprot.ReadStructEnd(ctx); err != nil {");
        self.line(
            "return thrift.PrependError(fmt.Sprintf(\"%T read struct end error: \", p), err)",
        );
        self.close("}");

        for member in required {
            self.open(format!("if !isset{} {{", member.name));
            self.line(format!(
                "return thrift.NewTProtocolExceptionWithType(thrift.INVALID_DATA, \
                 fmt.Errorf(\"Required field {} is not set\"))",
                member.name
            ));
            self.close("}");
        }
        self.line("return nil");
        self.close("}");
        self.blank();
    }

    /// Skip the current field, logging first when asked to.
    fn skip_field(&mut self, message: &str, args: &str) {
        if self.options.log_unexpected {
            self.line(format!("log.Printf(\"%T: {}\", p, {})", message, args));
        }
        self.open("if err := iprot.Skip(ctx, fieldTypeId); err != nil {");
        self.line("return err");
        self.close("}");
    }

    fn read_field(&mut self, name: &str, member: &Member<'_>) {
        self.open(format!(
            "func (p *{}) ReadField{}(ctx context.Context, iprot thrift.TProtocol) error {{",
            name, member.suffix
        ));
        self.read_value(&member.field.ty, &format!("p.{}", member.name), member.boxed);
        self.line("return nil");
        self.close("}");
        self.blank();
    }

    fn writer(&mut self, name: &str, def: &Struct, mode: WriteMode, members: &[Member<'_>]) {
        self.open(format!(
            "func (p *{}) Write(ctx context.Context, oprot thrift.TProtocol) error {{",
            name
        ));
        self.open(format!(
            "if err := oprot.WriteStructBegin(ctx, \"{}\"); err != nil {{",
            def.name
        ));
        self.line(
            "return thrift.PrependError(fmt.Sprintf(\"%T write struct begin error: \", p), err)",
        );
        self.close("}");

        if !members.is_empty() {
            self.open("if p != nil {");
            match mode {
                WriteMode::Sequential => {
                    for member in members {
                        self.call_write_field(member);
                    }
                }
                WriteMode::Exclusive => {
                    self.line("switch {");
                    for member in members {
                        self.line(format!("case p.IsSet{}():", member.name));
                        self.out.push_indent();
                        self.call_write_field(member);
                        self.out.push_dedent();
                    }
                    self.line("}");
                }
            }
            self.close("}");
        }

        self.open("if err := oprot.WriteFieldStop(ctx); err != nil {");
        self.line("return thrift.PrependError(\"write field stop error: \", err)");
        self.close("}");
        self.open("if err := oprot.WriteStructEnd(ctx); err != nil {");
        self.line("return thrift.PrependError(\"write struct stop error: \", err)");
        self.close("}");
        self.line("return nil");
        self.close("}");
        self.blank();
    }

    fn call_write_field(&mut self, member: &Member<'_>) {
        self.open(format!(
            "if err := p.writeField{}(ctx, oprot); err != nil {{",
            member.suffix
        ));
        self.line("return err");
        self.close("}");
    }

    fn write_field(&mut self, name: &str, member: &Member<'_>) {
        let field = member.field;
        self.open(format!(
            "func (p *{}) writeField{}(ctx context.Context, oprot thrift.TProtocol) (err error) {{",
            name, member.suffix
        ));
        if member.is_optional() {
            self.open(format!("if p.IsSet{}() {{", member.name));
        }
        self.open(format!(
            "if err := oprot.WriteFieldBegin(ctx, \"{}\", thrift.{}, {}); err != nil {{",
            field.name, member.wire, field.key
        ));
        self.line(format!(
            "return thrift.PrependError(fmt.Sprintf(\"%T write field begin error {}:{}: \", p), err)",
            field.key, field.name
        ));
        self.close("}");
        self.write_value(&field.ty, &member.value_expr());
        self.open("if err := oprot.WriteFieldEnd(ctx); err != nil {");
        self.line(format!(
            "return thrift.PrependError(fmt.Sprintf(\"%T write field end error {}:{}: \", p), err)",
            field.key, field.name
        ));
        self.close("}");
        if member.is_optional() {
            self.close("}");
        }
        self.line("return err");
        self.close("}");
        self.blank();
    }

    fn stringer(&mut self, name: &str, is_exception: bool) {
        self.open(format!("func (p *{}) String() string {{", name));
        self.open("if p == nil {");
        self.line("return \"<nil>\"");
        self.close("}");
        self.line(format!("return fmt.Sprintf(\"{}(%+v)\", *p)", name));
        self.close("}");

        if is_exception {
            self.blank();
            self.open(format!("func (p *{}) Error() string {{", name));
            self.line("return p.String()");
            self.close("}");
        }
    }
}
