//! Builds the JSON description of one program.
//!
//! The document lists every declaration in program order. Types are
//! described structurally (`{"typeId": "list", "elemType": {...}}`) with
//! typedefs resolved and their name kept alongside.

use serde_json::{Map, Value, json};
use thriftgen_ast::{
    Const, Enum, Field, Function, NamedType, Program, Requiredness, Service, Struct, Type, Typedef,
};
use thriftgen_codegen::{
    Result,
    classify::{Category, classify},
    driver::{ProgramVisitor, walk_program},
    value::render_const_value,
};
use tracing::{debug, trace};

use crate::{options::JsonOptions, syntax::JsonSyntax};

pub(crate) struct JsonEmitter<'a> {
    program: &'a Program,
    options: &'a JsonOptions,
    document: Map<String, Value>,
    typedefs: Vec<Value>,
    enums: Vec<Value>,
    constants: Vec<Value>,
    structs: Vec<Value>,
    services: Vec<Value>,
}

impl<'a> JsonEmitter<'a> {
    pub fn new(program: &'a Program, options: &'a JsonOptions) -> Self {
        Self {
            program,
            options,
            document: Map::new(),
            typedefs: Vec::new(),
            enums: Vec::new(),
            constants: Vec::new(),
            structs: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn into_document(self) -> Value {
        Value::Object(self.document)
    }

    /// Reference to a named declaration, qualified when it is foreign.
    fn class_name(&self, named: &NamedType) -> String {
        match named.foreign_program(&self.program.name) {
            Some(program) => format!("{}.{}", program, named.name),
            None => named.name.clone(),
        }
    }

    fn type_descriptor(&self, ty: &Type) -> Value {
        let mut desc = match classify(ty) {
            Category::Void => json!({"typeId": "void"}),
            Category::Base(base) => json!({"typeId": base.as_str()}),
            Category::Enum(named) => json!({"typeId": "enum", "class": self.class_name(named)}),
            Category::Struct(named) => {
                json!({"typeId": "struct", "class": self.class_name(named)})
            }
            Category::Exception(named) => {
                json!({"typeId": "exception", "class": self.class_name(named)})
            }
            Category::List(elem) => {
                json!({"typeId": "list", "elemType": self.type_descriptor(elem)})
            }
            Category::Set(elem) => json!({"typeId": "set", "elemType": self.type_descriptor(elem)}),
            Category::Map(key, value) => json!({
                "typeId": "map",
                "keyType": self.type_descriptor(key),
                "valueType": self.type_descriptor(value),
            }),
        };
        if let Type::Typedef { name, program, .. } = ty {
            let named = NamedType {
                name: name.clone(),
                program: program.clone(),
            };
            desc["typedef"] = Value::String(self.class_name(&named));
        }
        desc
    }

    fn field(&self, field: &Field) -> Result<Value> {
        let mut desc = Map::new();
        desc.insert("key".into(), json!(field.key));
        desc.insert("name".into(), json!(field.name));
        desc.insert("type".into(), self.type_descriptor(&field.ty));
        desc.insert("required".into(), json!(requiredness(field.requiredness)));
        if let Some(default) = &field.default {
            let value = render_const_value(&JsonSyntax, self.program, &field.ty, default)?;
            desc.insert("default".into(), value);
        }
        with_doc(&mut desc, field.doc.as_deref());
        Ok(Value::Object(desc))
    }

    fn fields(&self, fields: &[Field]) -> Result<Value> {
        fields
            .iter()
            .map(|f| self.field(f))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn function(&self, function: &Function) -> Result<Value> {
        let mut desc = Map::new();
        desc.insert("name".into(), json!(function.name));
        desc.insert("returnType".into(), self.type_descriptor(&function.returns));
        desc.insert("oneway".into(), json!(function.oneway));
        desc.insert("arguments".into(), self.fields(&function.arguments)?);
        desc.insert("exceptions".into(), self.fields(&function.exceptions)?);
        with_doc(&mut desc, function.doc.as_deref());
        Ok(Value::Object(desc))
    }

    /// Included programs by name, or as full documents when merging.
    fn includes(&self) -> Result<Value> {
        let mut includes = Vec::with_capacity(self.program.includes.len());
        for include in &self.program.includes {
            if self.options.merge_includes {
                debug!(program = %include.name, "embedding included program");
                let mut emitter = JsonEmitter::new(include, self.options);
                walk_program(include, &mut emitter)?;
                includes.push(emitter.into_document());
            } else {
                includes.push(json!(include.name));
            }
        }
        Ok(Value::Array(includes))
    }
}

impl ProgramVisitor for JsonEmitter<'_> {
    fn begin(&mut self, program: &Program) -> Result<()> {
        self.document.insert("name".into(), json!(program.name));
        with_doc(&mut self.document, program.doc.as_deref());
        self.document
            .insert("namespaces".into(), json!(program.namespaces));
        let includes = self.includes()?;
        self.document.insert("includes".into(), includes);
        Ok(())
    }

    fn visit_typedef(&mut self, def: &Typedef) -> Result<()> {
        let mut desc = Map::new();
        desc.insert("name".into(), json!(def.name));
        desc.insert("type".into(), self.type_descriptor(&def.target));
        with_doc(&mut desc, def.doc.as_deref());
        self.typedefs.push(Value::Object(desc));
        Ok(())
    }

    fn visit_enum(&mut self, def: &Enum) -> Result<()> {
        let members: Vec<Value> = def
            .values
            .iter()
            .map(|member| {
                let mut desc = Map::new();
                desc.insert("name".into(), json!(member.name));
                desc.insert("value".into(), json!(member.value));
                with_doc(&mut desc, member.doc.as_deref());
                Value::Object(desc)
            })
            .collect();

        let mut desc = Map::new();
        desc.insert("name".into(), json!(def.name));
        with_doc(&mut desc, def.doc.as_deref());
        desc.insert("members".into(), Value::Array(members));
        self.enums.push(Value::Object(desc));
        Ok(())
    }

    fn visit_consts(&mut self, consts: &[Const]) -> Result<()> {
        for constant in consts {
            trace!(name = %constant.name, "describing constant");
            let value =
                render_const_value(&JsonSyntax, self.program, &constant.ty, &constant.value)?;
            let mut desc = Map::new();
            desc.insert("name".into(), json!(constant.name));
            desc.insert("type".into(), self.type_descriptor(&constant.ty));
            desc.insert("value".into(), value);
            with_doc(&mut desc, constant.doc.as_deref());
            self.constants.push(Value::Object(desc));
        }
        Ok(())
    }

    fn visit_struct(&mut self, def: &Struct) -> Result<()> {
        let mut desc = Map::new();
        desc.insert("name".into(), json!(def.name));
        desc.insert("isException".into(), json!(def.is_exception));
        desc.insert("isUnion".into(), json!(def.is_union));
        with_doc(&mut desc, def.doc.as_deref());
        desc.insert("fields".into(), self.fields(&def.fields)?);
        self.structs.push(Value::Object(desc));
        Ok(())
    }

    fn visit_service(&mut self, service: &Service) -> Result<()> {
        let functions = service
            .functions
            .iter()
            .map(|f| self.function(f))
            .collect::<Result<Vec<_>>>()?;

        let mut desc = Map::new();
        desc.insert("name".into(), json!(service.name));
        if let Some(parent) = &service.extends {
            desc.insert("extends".into(), json!(self.class_name(parent)));
        }
        with_doc(&mut desc, service.doc.as_deref());
        desc.insert("functions".into(), Value::Array(functions));
        self.services.push(Value::Object(desc));
        Ok(())
    }

    fn finish(&mut self, program: &Program) -> Result<()> {
        debug!(program = %program.name, "assembling json document");
        let sections = [
            ("typedefs", std::mem::take(&mut self.typedefs)),
            ("enums", std::mem::take(&mut self.enums)),
            ("constants", std::mem::take(&mut self.constants)),
            ("structs", std::mem::take(&mut self.structs)),
            ("services", std::mem::take(&mut self.services)),
        ];
        for (key, items) in sections {
            self.document.insert(key.into(), Value::Array(items));
        }
        Ok(())
    }
}

fn requiredness(requiredness: Requiredness) -> &'static str {
    match requiredness {
        Requiredness::Required => "required",
        Requiredness::Optional => "optional",
        Requiredness::OptInReqOut => "default",
    }
}

fn with_doc(desc: &mut Map<String, Value>, doc: Option<&str>) {
    if let Some(doc) = doc {
        desc.insert("doc".into(), json!(doc));
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::testing::tutorial_program;

    use super::*;

    #[test]
    fn test_type_descriptor_keeps_typedef_name() {
        let program = tutorial_program();
        let options = JsonOptions::default();
        let emitter = JsonEmitter::new(&program, &options);

        let ty = Type::list(Type::typedef("MyInteger", Type::I32));
        assert_eq!(
            emitter.type_descriptor(&ty),
            json!({"typeId": "list", "elemType": {"typeId": "i32", "typedef": "MyInteger"}})
        );
    }

    #[test]
    fn test_foreign_class_is_qualified() {
        let program = tutorial_program();
        let options = JsonOptions::default();
        let emitter = JsonEmitter::new(&program, &options);

        let shared = Type::Struct(NamedType::external("shared", "SharedStruct"));
        let local = Type::Struct(NamedType::external("tutorial", "Work"));
        assert_eq!(emitter.type_descriptor(&shared)["class"], "shared.SharedStruct");
        assert_eq!(emitter.type_descriptor(&local)["class"], "Work");
    }
}
