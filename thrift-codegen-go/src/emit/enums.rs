use std::collections::HashSet;

use thriftgen_ast::Enum;

use super::GoEmitter;
use crate::naming::GO_NAMING;

impl GoEmitter<'_> {
    /// `type X int64`, one constant per member, and conversions to and
    /// from the member names.
    pub(super) fn emit_enum(&mut self, def: &Enum) {
        let name = GO_NAMING.type_name(&def.name);

        self.doc(def.doc.as_deref());
        self.line(format!("type {} int64", name));
        self.blank();

        self.open("const (");
        for member in &def.values {
            self.doc(member.doc.as_deref());
            self.line(format!(
                "{}_{} {} = {}",
                name, member.name, name, member.value
            ));
        }
        self.close(")");
        self.blank();

        // Members may share a value; the first one names it.
        let mut seen = HashSet::new();
        self.open(format!("func (p {}) String() string {{", name));
        self.line("switch p {");
        for member in def.values.iter().filter(|m| seen.insert(m.value)) {
            self.line(format!("case {}_{}:", name, member.name));
            self.out.push_indent();
            self.line(format!("return \"{}\"", member.name));
            self.out.push_dedent();
        }
        self.line("}");
        self.line("return \"<UNSET>\"");
        self.close("}");
        self.blank();

        self.open(format!(
            "func {}FromString(s string) ({}, error) {{",
            name, name
        ));
        self.line("switch s {");
        for member in &def.values {
            self.line(format!("case \"{}\":", member.name));
            self.out.push_indent();
            self.line(format!("return {}_{}, nil", name, member.name));
            self.out.push_dedent();
        }
        self.line("}");
        self.line(format!(
            "return {}(0), fmt.Errorf(\"not a valid {} string\")",
            name, name
        ));
        self.close("}");
        self.blank();

        self.line(format!(
            "func {}Ptr(v {}) *{} {{ return &v }}",
            name, name, name
        ));
    }
}
