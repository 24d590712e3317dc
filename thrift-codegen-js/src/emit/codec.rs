//! Value-level read and write statements. `input` or `output` is the
//! protocol in scope.

use thriftgen_ast::{BaseType, Type};
use thriftgen_codegen::classify::{Category, classify, wire_type};

use super::JsEmitter;

impl JsEmitter<'_> {
    /// Decode one value of `ty` into the lvalue `target`.
    pub(super) fn read_value(&mut self, ty: &Type, target: &str) {
        match classify(ty) {
            Category::Void => {}
            Category::Base(base) => {
                self.line(format!("{} = input.{}();", target, protocol_method("read", base)))
            }
            Category::Enum(_) => self.line(format!("{} = input.readI32();", target)),
            Category::Struct(named) | Category::Exception(named) => {
                let class = self.mapper().class_name(named);
                self.line(format!("{} = new {}();", target, class));
                self.line(format!("{}.read(input);", target));
            }
            Category::List(elem) => self.read_sequence(elem, target, "List"),
            Category::Set(elem) => self.read_sequence(elem, target, "Set"),
            Category::Map(key, value) => {
                let header = self.fresh("_rtmp");
                let size = self.fresh("_size");
                let index = self.fresh("_i");
                let key_var = self.fresh("key");
                let value_var = self.fresh("val");

                self.line(format!("{} = {{}};", target));
                self.line(format!("const {} = input.readMapBegin();", header));
                self.line(format!("const {} = {}.size || 0;", size, header));
                self.open(format!(
                    "for (let {i} = 0; {i} < {size}; ++{i}) {{",
                    i = index,
                    size = size
                ));
                self.line(format!("let {} = null;", key_var));
                self.line(format!("let {} = null;", value_var));
                self.read_value(key, &key_var);
                self.read_value(value, &value_var);
                self.line(format!("{}[{}] = {};", target, key_var, value_var));
                self.close("}");
                self.line("input.readMapEnd();");
            }
        }
    }

    fn read_sequence(&mut self, elem: &Type, target: &str, kind: &str) {
        let header = self.fresh("_rtmp");
        let size = self.fresh("_size");
        let index = self.fresh("_i");
        let item = self.fresh("elem");

        self.line(format!("{} = [];", target));
        self.line(format!("const {} = input.read{}Begin();", header, kind));
        self.line(format!("const {} = {}.size || 0;", size, header));
        self.open(format!(
            "for (let {i} = 0; {i} < {size}; ++{i}) {{",
            i = index,
            size = size
        ));
        self.line(format!("let {} = null;", item));
        self.read_value(elem, &item);
        self.line(format!("{}.push({});", target, item));
        self.close("}");
        self.line(format!("input.read{}End();", kind));
    }

    /// Encode `expr`, a value of `ty`.
    pub(super) fn write_value(&mut self, ty: &Type, expr: &str) {
        match classify(ty) {
            Category::Void => {}
            Category::Base(base) => {
                self.line(format!("output.{}({});", protocol_method("write", base), expr))
            }
            Category::Enum(_) => self.line(format!("output.writeI32({});", expr)),
            Category::Struct(_) | Category::Exception(_) => {
                self.line(format!("{}.write(output);", expr))
            }
            Category::List(elem) => self.write_sequence(elem, expr, "List"),
            Category::Set(elem) => self.write_sequence(elem, expr, "Set"),
            Category::Map(key, value) => {
                let key_var = self.fresh("kiter");
                let value_var = self.fresh("viter");

                self.line(format!(
                    "output.writeMapBegin(Thrift.Type.{}, Thrift.Type.{}, Thrift.objectLength({}));",
                    wire_type(key),
                    wire_type(value),
                    expr
                ));
                self.open(format!(
                    "for (const [{}, {}] of Object.entries({})) {{",
                    key_var, value_var, expr
                ));
                self.write_value(key, &key_var);
                self.write_value(value, &value_var);
                self.close("}");
                self.line("output.writeMapEnd();");
            }
        }
    }

    fn write_sequence(&mut self, elem: &Type, expr: &str, kind: &str) {
        let item = self.fresh("iter");

        self.line(format!(
            "output.write{}Begin(Thrift.Type.{}, {}.length);",
            kind,
            wire_type(elem),
            expr
        ));
        self.open(format!("for (const {} of {}) {{", item, expr));
        self.write_value(elem, &item);
        self.close("}");
        self.line(format!("output.write{}End();", kind));
    }
}

/// `readI32`, `writeString`, ...
fn protocol_method(direction: &str, base: BaseType) -> String {
    let suffix = match base {
        BaseType::Bool => "Bool",
        BaseType::I8 => "Byte",
        BaseType::I16 => "I16",
        BaseType::I32 => "I32",
        BaseType::I64 => "I64",
        BaseType::Double => "Double",
        BaseType::String => "String",
        BaseType::Binary => "Binary",
    };
    format!("{}{}", direction, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_method() {
        assert_eq!(protocol_method("read", BaseType::I8), "readByte");
        assert_eq!(protocol_method("write", BaseType::Binary), "writeBinary");
    }
}
