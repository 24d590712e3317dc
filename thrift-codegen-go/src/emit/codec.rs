//! Value-level read and write statements.
//!
//! Generated code runs inside a `Read`/`Write` method with `ctx`, `iprot`
//! or `oprot` in scope. Every failing protocol call returns early.

use thriftgen_ast::{BaseType, Type};
use thriftgen_codegen::{
    classify::{Category, classify, wire_type},
    language::TypeMapper,
};

use super::GoEmitter;

impl GoEmitter<'_> {
    /// Decode one value of `ty` into `target`. A `boxed` target holds a
    /// pointer to the value.
    pub(super) fn read_value(&mut self, ty: &Type, target: &str, boxed: bool) {
        match classify(ty) {
            Category::Void => {}
            Category::Base(base) => self.read_scalar(ty, read_method(base), target, boxed),
            Category::Enum(_) => self.read_scalar(ty, "ReadI32", target, boxed),
            Category::Struct(named) | Category::Exception(named) => {
                self.line(format!("{} = {}()", target, self.mapper.constructor(named)));
                self.open(format!("if err := {}.Read(ctx, iprot); err != nil {{", target));
                self.line(format!(
                    "return thrift.PrependError(fmt.Sprintf(\"%T error reading struct: \", {}), err)",
                    target
                ));
                self.close("}");
            }
            Category::List(elem) => self.read_sequence(ty, elem, target, "List"),
            Category::Set(elem) => self.read_sequence(ty, elem, target, "Set"),
            Category::Map(key, value) => self.read_map(ty, key, value, target),
        }
    }

    fn read_scalar(&mut self, ty: &Type, method: &str, target: &str, boxed: bool) {
        let go_type = self.mapper.type_name(ty);
        let temp = self.fresh("v");

        self.open(format!("if v, err := iprot.{}(ctx); err != nil {{", method));
        self.line("return thrift.PrependError(\"error reading value: \", err)");
        self.out.push_dedent();
        self.open("} else {");
        self.line(format!("{} := {}(v)", temp, go_type));
        let reference = if boxed { "&" } else { "" };
        self.line(format!("{} = {}{}", target, reference, temp));
        self.close("}");
    }

    fn read_sequence(&mut self, ty: &Type, elem: &Type, target: &str, kind: &str) {
        let go_type = self.mapper.type_name(ty);
        let elem_type = self.mapper.type_name(elem);
        let size = self.fresh("size");
        let slice = self.fresh("tSlice");
        let index = self.fresh("i");
        let item = self.fresh("elem");

        self.line(format!("_, {}, err := iprot.Read{}Begin(ctx)", size, kind));
        self.open("if err != nil {");
        self.line(format!(
            "return thrift.PrependError(\"error reading {} begin: \", err)",
            kind.to_lowercase()
        ));
        self.close("}");
        self.line(format!("{} := make({}, 0, {})", slice, go_type, size));
        self.line(format!("{} = {}", target, slice));

        self.open(format!(
            "for {} := 0; {} < {}; {}++ {{",
            index, index, size, index
        ));
        self.line(format!("var {} {}", item, elem_type));
        self.read_value(elem, &item, false);
        self.line(format!("{} = append({}, {})", target, target, item));
        self.close("}");

        self.open(format!("if err := iprot.Read{}End(ctx); err != nil {{", kind));
        self.line(format!(
            "return thrift.PrependError(\"error reading {} end: \", err)",
            kind.to_lowercase()
        ));
        self.close("}");
    }

    fn read_map(&mut self, ty: &Type, key: &Type, value: &Type, target: &str) {
        let go_type = self.mapper.type_name(ty);
        let key_type = self.mapper.type_name(key);
        let value_type = self.mapper.type_name(value);
        let size = self.fresh("size");
        let map = self.fresh("tMap");
        let index = self.fresh("i");
        let key_var = self.fresh("key");
        let value_var = self.fresh("val");

        self.line(format!("_, _, {}, err := iprot.ReadMapBegin(ctx)", size));
        self.open("if err != nil {");
        self.line("return thrift.PrependError(\"error reading map begin: \", err)");
        self.close("}");
        self.line(format!("{} := make({}, {})", map, go_type, size));
        self.line(format!("{} = {}", target, map));

        self.open(format!(
            "for {} := 0; {} < {}; {}++ {{",
            index, index, size, index
        ));
        self.line(format!("var {} {}", key_var, key_type));
        self.read_value(key, &key_var, false);
        self.line(format!("var {} {}", value_var, value_type));
        self.read_value(value, &value_var, false);
        self.line(format!("{}[{}] = {}", target, key_var, value_var));
        self.close("}");

        self.open("if err := iprot.ReadMapEnd(ctx); err != nil {");
        self.line("return thrift.PrependError(\"error reading map end: \", err)");
        self.close("}");
    }

    /// Encode the value of `expr`, which has type `ty`.
    pub(super) fn write_value(&mut self, ty: &Type, expr: &str) {
        match classify(ty) {
            Category::Void => {}
            Category::Base(base) => {
                let (method, conversion) = write_method(base);
                self.open(format!(
                    "if err := oprot.{}(ctx, {}({})); err != nil {{",
                    method, conversion, expr
                ));
                self.line("return thrift.PrependError(\"error writing value: \", err)");
                self.close("}");
            }
            Category::Enum(_) => {
                self.open(format!(
                    "if err := oprot.WriteI32(ctx, int32({})); err != nil {{",
                    expr
                ));
                self.line("return thrift.PrependError(\"error writing enum value: \", err)");
                self.close("}");
            }
            Category::Struct(_) | Category::Exception(_) => {
                self.open(format!("if err := {}.Write(ctx, oprot); err != nil {{", expr));
                self.line(format!(
                    "return thrift.PrependError(fmt.Sprintf(\"%T error writing struct: \", {}), err)",
                    expr
                ));
                self.close("}");
            }
            Category::List(elem) => self.write_sequence(elem, expr, "List"),
            Category::Set(elem) => self.write_sequence(elem, expr, "Set"),
            Category::Map(key, value) => {
                let key_var = self.fresh("k");
                let value_var = self.fresh("v");

                self.open(format!(
                    "if err := oprot.WriteMapBegin(ctx, thrift.{}, thrift.{}, len({})); err != nil {{",
                    wire_type(key),
                    wire_type(value),
                    expr
                ));
                self.line("return thrift.PrependError(\"error writing map begin: \", err)");
                self.close("}");
                self.open(format!(
                    "for {}, {} := range {} {{",
                    key_var, value_var, expr
                ));
                self.write_value(key, &key_var);
                self.write_value(value, &value_var);
                self.close("}");
                self.open("if err := oprot.WriteMapEnd(ctx); err != nil {");
                self.line("return thrift.PrependError(\"error writing map end: \", err)");
                self.close("}");
            }
        }
    }

    fn write_sequence(&mut self, elem: &Type, expr: &str, kind: &str) {
        let item = self.fresh("v");
        let lower = kind.to_lowercase();

        self.open(format!(
            "if err := oprot.Write{}Begin(ctx, thrift.{}, len({})); err != nil {{",
            kind,
            wire_type(elem),
            expr
        ));
        self.line(format!(
            "return thrift.PrependError(\"error writing {} begin: \", err)",
            lower
        ));
        self.close("}");
        self.open(format!("for _, {} := range {} {{", item, expr));
        self.write_value(elem, &item);
        self.close("}");
        self.open(format!("if err := oprot.Write{}End(ctx); err != nil {{", kind));
        self.line(format!(
            "return thrift.PrependError(\"error writing {} end: \", err)",
            lower
        ));
        self.close("}");
    }
}

fn read_method(base: BaseType) -> &'static str {
    match base {
        BaseType::Bool => "ReadBool",
        BaseType::I8 => "ReadByte",
        BaseType::I16 => "ReadI16",
        BaseType::I32 => "ReadI32",
        BaseType::I64 => "ReadI64",
        BaseType::Double => "ReadDouble",
        BaseType::String => "ReadString",
        BaseType::Binary => "ReadBinary",
    }
}

/// Protocol method and the conversion its argument needs.
fn write_method(base: BaseType) -> (&'static str, &'static str) {
    match base {
        BaseType::Bool => ("WriteBool", "bool"),
        BaseType::I8 => ("WriteByte", "int8"),
        BaseType::I16 => ("WriteI16", "int16"),
        BaseType::I32 => ("WriteI32", "int32"),
        BaseType::I64 => ("WriteI64", "int64"),
        BaseType::Double => ("WriteDouble", "float64"),
        BaseType::String => ("WriteString", "string"),
        BaseType::Binary => ("WriteBinary", "[]byte"),
    }
}
