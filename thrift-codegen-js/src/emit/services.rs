//! Service files: the wrapper classes of every function, a promise-based
//! client and a processor dispatching to a handler object.

use thriftgen_ast::{Function, NamedType, Service};
use thriftgen_codegen::{
    Result,
    language::TypeMapper,
    plan::WriteMode,
    synthetic::{args_struct, args_struct_name, result_struct, result_struct_name},
    value::quoted,
};
use tracing::debug;

use super::{Export, JsEmitter};
use crate::naming::JS_NAMING;

impl JsEmitter<'_> {
    pub(super) fn emit_service(&mut self, service: &Service) -> Result<()> {
        debug!(service = %service.name, "rendering service file");
        let name = JS_NAMING.type_name(&service.name);

        self.header();
        self.service_requires(service);

        for function in &service.functions {
            self.emit_struct(
                &args_struct(service, function),
                WriteMode::Sequential,
                Export::Private,
            )?;
            if let Some(result) = result_struct(service, function) {
                self.emit_struct(&result, WriteMode::Exclusive, Export::Private)?;
            }
        }

        let client = format!("{}Client", name);
        let processor = format!("{}Processor", name);
        self.client(service, &client);
        self.processor(service, &processor);
        self.publish(&[client, processor]);
        Ok(())
    }

    fn service_requires(&mut self, service: &Service) {
        if !self.options.node {
            return;
        }
        self.blank();
        if let Some(parent) = &service.extends {
            let binding = parent_binding(parent);
            self.line(format!(
                "const {} = require(\"./{}\");",
                binding,
                JS_NAMING.file_name(&parent.name)
            ));
        }
        self.line(format!(
            "const ttypes = require(\"./{}\");",
            self.layout.types_module
        ));
        let layout = self.layout;
        for (binding, path) in &layout.requires {
            self.line(format!("const {} = require(\"{}\");", binding, path));
        }
    }

    /// Binding of the parent service's client or processor class.
    fn parent_class(&self, parent: &NamedType, role: &str) -> String {
        if self.options.node {
            format!("{}.{}", parent_binding(parent), role)
        } else {
            self.mapper().qualify(
                parent.program.as_deref(),
                &format!("{}{}", JS_NAMING.type_name(&parent.name), role),
            )
        }
    }

    fn extends_clause(&self, service: &Service, role: &str) -> String {
        match &service.extends {
            Some(parent) => format!(" extends {}", self.parent_class(parent, role)),
            None => String::new(),
        }
    }

    fn client(&mut self, service: &Service, client: &str) {
        let lhs = self.declare(client, Export::As("Client"));
        let extends = self.extends_clause(service, "Client");

        self.blank();
        self.doc(service.doc.as_deref());
        self.open(format!("{}class{} {{", lhs, extends));
        self.open("constructor(output, pClass) {");
        if service.extends.is_some() {
            self.line("super(output, pClass);");
        }
        self.line("this.output = output;");
        self.line("this.pClass = pClass;");
        self.line("this._seqid = 0;");
        self.line("this._reqs = {};");
        self.close("}");

        if service.extends.is_none() {
            self.blank();
            self.open("seqid() {");
            self.line("return this._seqid;");
            self.close("}");
            self.blank();
            self.open("new_seqid() {");
            self.line("return this._seqid += 1;");
            self.close("}");
        }

        for function in &service.functions {
            self.blank();
            self.client_call(function);
            self.blank();
            self.client_send(service, function);
            if !function.oneway {
                self.blank();
                self.client_recv(service, function);
            }
        }
        self.close("};");
    }

    fn jsdoc(&mut self, function: &Function) {
        let mapper = self.mapper();
        let mut lines: Vec<String> = function
            .doc
            .iter()
            .flat_map(|doc| doc.lines().map(str::to_string))
            .collect();
        for arg in &function.arguments {
            lines.push(format!(
                "@param {{{}}} {}",
                mapper.type_name(&arg.ty),
                JS_NAMING.safe_name(&arg.name)
            ));
        }
        lines.push(format!(
            "@returns {{Promise<{}>}}",
            mapper.type_name(&function.returns)
        ));
        self.out.push_doc_block(&lines.join("\n"));
    }

    fn client_call(&mut self, function: &Function) {
        let params = parameters(function);

        self.jsdoc(function);
        self.open(format!("{}({}) {{", function.name, params));
        self.line("this.new_seqid();");
        if function.oneway {
            self.line(format!("this.send_{}({});", function.name, params));
            self.line("return Promise.resolve();");
        } else {
            self.line("const self = this;");
            self.open("return new Promise((resolve, reject) => {");
            self.open("self._reqs[self.seqid()] = (error, result) => {");
            self.line("return error ? reject(error) : resolve(result);");
            self.close("};");
            self.line(format!("self.send_{}({});", function.name, params));
            self.close("});");
        }
        self.close("}");
    }

    fn client_send(&mut self, service: &Service, function: &Function) {
        let args_name = args_struct_name(&service.name, &function.name);
        let args_class = self.local_class(&JS_NAMING.type_name(&args_name));
        let fields: Vec<String> = function
            .arguments
            .iter()
            .map(|arg| format!("{}: {}", quoted(&arg.name), JS_NAMING.safe_name(&arg.name)))
            .collect();
        let message_type = if function.oneway { "ONEWAY" } else { "CALL" };

        self.open(format!(
            "send_{}({}) {{",
            function.name,
            parameters(function)
        ));
        self.line("const output = new this.pClass(this.output);");
        self.line(format!(
            "const args = new {}({{{}}});",
            args_class,
            fields.join(", ")
        ));
        self.open("try {");
        self.line(format!(
            "output.writeMessageBegin({}, Thrift.MessageType.{}, this.seqid());",
            quoted(&function.name),
            message_type
        ));
        self.line("args.write(output);");
        self.line("output.writeMessageEnd();");
        self.line("return this.output.flush();");
        self.out.push_dedent();
        self.open("} catch (e) {");
        self.line("delete this._reqs[this.seqid()];");
        self.open("if (typeof output.reset === \"function\") {");
        self.line("output.reset();");
        self.close("}");
        self.line("throw e;");
        self.close("}");
        self.close("}");
    }

    fn client_recv(&mut self, service: &Service, function: &Function) {
        let result_class = self
            .local_class(&JS_NAMING.type_name(&result_struct_name(&service.name, &function.name)));

        self.open(format!("recv_{}(input, mtype, rseqid) {{", function.name));
        self.line("const callback = this._reqs[rseqid] || function() {};");
        self.line("delete this._reqs[rseqid];");
        self.open("if (mtype == Thrift.MessageType.EXCEPTION) {");
        self.line("const x = new Thrift.TApplicationException();");
        self.line("x.read(input);");
        self.line("input.readMessageEnd();");
        self.line("return callback(x);");
        self.close("}");
        self.line(format!("const result = new {}();", result_class));
        self.line("result.read(input);");
        self.line("input.readMessageEnd();");

        for exception in &function.exceptions {
            self.open(format!("if (result.{} !== null) {{", exception.name));
            self.line(format!("return callback(result.{});", exception.name));
            self.close("}");
        }
        if function.returns.is_void() {
            self.line("return callback(null);");
        } else {
            self.open("if (result.success !== null) {");
            self.line("return callback(null, result.success);");
            self.close("}");
            self.line(format!(
                "return callback({});",
                quoted(&format!("{} failed: unknown result", function.name))
            ));
        }
        self.close("}");
    }

    fn processor(&mut self, service: &Service, processor: &str) {
        let lhs = self.declare(processor, Export::As("Processor"));
        let extends = self.extends_clause(service, "Processor");

        self.blank();
        self.open(format!("{}class{} {{", lhs, extends));
        self.open("constructor(handler) {");
        if service.extends.is_some() {
            self.line("super(handler);");
        }
        self.line("this._handler = handler;");
        self.close("}");

        if service.extends.is_none() {
            self.blank();
            self.dispatch();
        }

        for function in &service.functions {
            self.blank();
            self.process_function(service, function);
        }
        self.close("};");
    }

    /// `process`: route a call to its `process_<name>` method.
    fn dispatch(&mut self) {
        self.open("process(input, output) {");
        self.line("const r = input.readMessageBegin();");
        self.open("if (this[\"process_\" + r.fname]) {");
        self.line("return this[\"process_\" + r.fname].call(this, r.rseqid, input, output);");
        self.close("}");
        self.line("input.skip(Thrift.Type.STRUCT);");
        self.line("input.readMessageEnd();");
        self.line(
            "const x = new Thrift.TApplicationException(Thrift.TApplicationExceptionType.UNKNOWN_METHOD, \"Unknown function \" + r.fname);",
        );
        self.line("output.writeMessageBegin(r.fname, Thrift.MessageType.EXCEPTION, r.rseqid);");
        self.line("x.write(output);");
        self.line("output.writeMessageEnd();");
        self.line("output.flush();");
        self.close("}");
    }

    fn process_function(&mut self, service: &Service, function: &Function) {
        let args_name = args_struct_name(&service.name, &function.name);
        let args_class = self.local_class(&JS_NAMING.type_name(&args_name));
        let call_args: Vec<String> = function
            .arguments
            .iter()
            .map(|arg| format!("args.{}", arg.name))
            .collect();
        let call = format!("this._handler.{}({})", function.name, call_args.join(", "));
        let method = quoted(&function.name);

        self.open(format!("process_{}(seqid, input, output) {{", function.name));
        self.line(format!("const args = new {}();", args_class));
        self.line("args.read(input);");
        self.line("input.readMessageEnd();");

        if function.oneway {
            self.line(format!("{};", call));
            self.close("}");
            return;
        }

        let result_class = self
            .local_class(&JS_NAMING.type_name(&result_struct_name(&service.name, &function.name)));
        let (param, init) = if function.returns.is_void() {
            ("()", String::new())
        } else {
            ("success", "{\"success\": success}".to_string())
        };

        self.open(format!("Promise.resolve({}).then({} => {{", call, param));
        self.line(format!("const result = new {}({});", result_class, init));
        self.line(format!(
            "output.writeMessageBegin({}, Thrift.MessageType.REPLY, seqid);",
            method
        ));
        self.line("result.write(output);");
        self.line("output.writeMessageEnd();");
        self.line("output.flush();");
        self.out.push_dedent();
        self.open("}).catch(err => {");
        self.line("let result;");

        for (i, exception) in function.exceptions.iter().enumerate() {
            let class = self.mapper().type_name(&exception.ty);
            let condition = format!("err instanceof {}", class);
            if i == 0 {
                self.open(format!("if ({}) {{", condition));
            } else {
                self.out.push_dedent();
                self.open(format!("}} else if ({}) {{", condition));
            }
            self.line(format!(
                "result = new {}({{{}: err}});",
                result_class,
                quoted(&exception.name)
            ));
            self.line(format!(
                "output.writeMessageBegin({}, Thrift.MessageType.REPLY, seqid);",
                method
            ));
        }
        if !function.exceptions.is_empty() {
            self.out.push_dedent();
            self.open("} else {");
        }
        self.line(
            "result = new Thrift.TApplicationException(Thrift.TApplicationExceptionType.UNKNOWN, err.message);",
        );
        self.line(format!(
            "output.writeMessageBegin({}, Thrift.MessageType.EXCEPTION, seqid);",
            method
        ));
        if !function.exceptions.is_empty() {
            self.close("}");
        }
        self.line("result.write(output);");
        self.line("output.writeMessageEnd();");
        self.line("output.flush();");
        self.close("});");
        self.close("}");
    }
}

/// Node binding of a parent service module.
fn parent_binding(parent: &NamedType) -> String {
    JS_NAMING.safe_name(&parent.name)
}

fn parameters(function: &Function) -> String {
    function
        .arguments
        .iter()
        .map(|arg| JS_NAMING.safe_name(&arg.name))
        .collect::<Vec<_>>()
        .join(", ")
}
