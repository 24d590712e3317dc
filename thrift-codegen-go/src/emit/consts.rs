use thriftgen_ast::{BaseType, Const, Typedef};
use thriftgen_codegen::{
    Result,
    classify::{Category, classify},
    language::TypeMapper,
    value::render_const_value,
};

use super::GoEmitter;
use crate::naming::GO_NAMING;

impl GoEmitter<'_> {
    /// Struct and enum typedefs become aliases so methods and member
    /// constants carry over; everything else is a defined type.
    pub(super) fn emit_typedef(&mut self, typedef: &Typedef) {
        let name = GO_NAMING.type_name(&typedef.name);
        let target = self.mapper.type_name(&typedef.target);

        self.doc(typedef.doc.as_deref());
        match classify(&typedef.target) {
            category if category.is_struct_like() => {
                self.line(format!(
                    "type {} = {}",
                    name,
                    target.trim_start_matches('*')
                ));
            }
            Category::Enum(_) => {
                self.line(format!("type {} = {}", name, target));
                self.blank();
                self.line(format!("func {}Ptr(v {}) *{} {{ return &v }}", name, name, name));
            }
            _ => {
                self.line(format!("type {} {}", name, target));
                self.blank();
                self.line(format!("func {}Ptr(v {}) *{} {{ return &v }}", name, name, name));
            }
        }
    }

    /// Scalars are Go constants. Everything else is a package variable
    /// assigned in `init`, since Go has no composite constants.
    pub(super) fn emit_consts(&mut self, consts: &[Const]) -> Result<()> {
        let syntax = self.syntax();
        let mut deferred = Vec::new();

        for constant in consts {
            let name = GO_NAMING.type_name(&constant.name);
            let ty = self.mapper.type_name(&constant.ty);
            let value = render_const_value(&syntax, self.program, &constant.ty, &constant.value)?;

            self.blank();
            self.doc(constant.doc.as_deref());
            if is_scalar(constant) {
                self.line(format!("const {} {} = {}", name, ty, value));
            } else {
                self.line(format!("var {} {}", name, ty));
                deferred.push((name, value));
            }
        }

        if !deferred.is_empty() {
            self.blank();
            self.open("func init() {");
            for (name, value) in deferred {
                self.line(format!("{} = {}", name, value));
            }
            self.close("}");
        }
        Ok(())
    }
}

fn is_scalar(constant: &Const) -> bool {
    match classify(&constant.ty) {
        Category::Base(base) => base != BaseType::Binary,
        Category::Enum(_) => true,
        _ => false,
    }
}
