//! Services: handler interface, client, processor and the wrapper structs
//! of every function.

use thriftgen_ast::{Field, Function, Service};
use thriftgen_codegen::{
    Result,
    language::TypeMapper,
    plan::{Presence, WriteMode, presence},
    synthetic::{args_struct, args_struct_name, result_struct, result_struct_name},
};

use super::GoEmitter;
use crate::{
    naming::{GO_NAMING, member_name, param_name},
    type_mapper::is_boxed,
};

impl GoEmitter<'_> {
    pub(super) fn emit_service(&mut self, service: &Service) -> Result<()> {
        let name = GO_NAMING.type_name(&service.name);
        let parent = service
            .extends
            .as_ref()
            .map(|named| self.mapper.bare_name(named));

        self.blank();
        self.interface(service, &name, parent.as_deref());
        self.client(service, &name, parent.as_deref());
        self.processor(service, &name, parent.as_deref());

        for function in &service.functions {
            self.emit_struct(&args_struct(service, function), WriteMode::Sequential)?;
            if let Some(result) = result_struct(service, function) {
                self.emit_struct(&result, WriteMode::Exclusive)?;
            }
        }
        Ok(())
    }

    /// `(ctx context.Context, num1 int32, ...)`
    fn parameters(&self, function: &Function) -> String {
        let mut params = vec!["ctx context.Context".to_string()];
        params.extend(function.arguments.iter().map(|arg| {
            format!(
                "{} {}",
                param_name(&arg.name),
                self.mapper.field_type(arg, presence(arg))
            )
        }));
        params.join(", ")
    }

    /// `(_r int32, _err error)` or `(_err error)` for void functions.
    fn results(&self, function: &Function) -> String {
        if function.returns.is_void() {
            "(_err error)".to_string()
        } else {
            format!("(_r {}, _err error)", self.mapper.type_name(&function.returns))
        }
    }

    fn signature(&self, function: &Function) -> String {
        format!(
            "{}({}) {}",
            GO_NAMING.type_name(&function.name),
            self.parameters(function),
            self.results(function)
        )
    }

    fn interface(&mut self, service: &Service, name: &str, parent: Option<&str>) {
        self.doc(service.doc.as_deref());
        self.open(format!("type {} interface {{", name));
        if let Some(parent) = parent {
            self.line(parent);
        }
        for function in &service.functions {
            self.doc(function.doc.as_deref());
            let signature = self.signature(function);
            self.line(signature);
        }
        self.close("}");
        self.blank();
    }

    fn client(&mut self, service: &Service, name: &str, parent: Option<&str>) {
        let client = format!("{}Client", name);

        self.open(format!("type {} struct {{", client));
        match parent {
            Some(parent) => self.line(format!("*{}Client", parent)),
            None => self.line("c thrift.TClient"),
        }
        self.close("}");
        self.blank();

        self.open(format!(
            "func New{}(c thrift.TClient) *{} {{",
            client, client
        ));
        match parent {
            Some(parent) => {
                let (package, base) = split_qualified(parent);
                self.open(format!("return &{}{{", client));
                self.line(format!("{}Client: {}New{}Client(c),", base, package, base));
                self.close("}");
            }
            None => self.line(format!("return &{}{{c: c}}", client)),
        }
        self.close("}");
        self.blank();

        if parent.is_none() {
            self.open(format!("func (p *{}) Client_() thrift.TClient {{", client));
            self.line("return p.c");
            self.close("}");
            self.blank();
        }

        for function in &service.functions {
            self.client_method(service, &client, function);
        }
    }

    fn client_method(&mut self, service: &Service, client: &str, function: &Function) {
        let args_type = GO_NAMING.type_name(&args_struct_name(&service.name, &function.name));
        let signature = self.signature(function);

        self.open(format!("func (p *{}) {} {{", client, signature));
        self.line(format!("var _args {}", args_type));
        for arg in &function.arguments {
            self.line(format!(
                "_args.{} = {}",
                member_name(&arg.name),
                param_name(&arg.name)
            ));
        }

        if function.oneway {
            self.line(format!(
                "_, _err = p.Client_().Call(ctx, \"{}\", &_args, nil)",
                function.name
            ));
            self.line("return");
            self.close("}");
            self.blank();
            return;
        }

        let result_type =
            GO_NAMING.type_name(&result_struct_name(&service.name, &function.name));
        self.line(format!("var _result {}", result_type));
        self.open(format!(
            "if _, _err = p.Client_().Call(ctx, \"{}\", &_args, &_result); _err != nil {{",
            function.name
        ));
        self.line("return");
        self.close("}");

        if !function.exceptions.is_empty() {
            self.line("switch {");
            for exception in &function.exceptions {
                let member = member_name(&exception.name);
                self.line(format!("case _result.{} != nil:", member));
                self.out.push_indent();
                self.line(format!("_err = _result.{}", member));
                self.line("return");
                self.out.push_dedent();
            }
            self.line("}");
        }

        if function.returns.is_void() {
            self.line("return nil");
        } else {
            self.line("return _result.GetSuccess(), nil");
        }
        self.close("}");
        self.blank();
    }

    fn processor(&mut self, service: &Service, name: &str, parent: Option<&str>) {
        let processor = format!("{}Processor", name);

        self.open(format!("type {} struct {{", processor));
        match parent {
            Some(parent) => self.line(format!("*{}Processor", parent)),
            None => self.line("processorMap map[string]thrift.TProcessorFunction"),
        }
        self.line(format!("handler {}", name));
        self.close("}");
        self.blank();

        if parent.is_none() {
            self.root_processor_methods(&processor);
        }

        self.open(format!(
            "func New{}(handler {}) *{} {{",
            processor, name, processor
        ));
        match parent {
            Some(parent) => {
                let (package, base) = split_qualified(parent);
                self.line(format!(
                    "self := &{}{{{}New{}Processor(handler), handler}}",
                    processor, package, base
                ));
            }
            None => self.line(format!(
                "self := &{}{{handler: handler, processorMap: make(map[string]thrift.TProcessorFunction)}}",
                processor
            )),
        }
        for function in &service.functions {
            self.line(format!(
                "self.AddToProcessorMap(\"{}\", &{}{{handler: handler}})",
                function.name,
                function_processor(name, function)
            ));
        }
        self.line("return self");
        self.close("}");
        self.blank();

        for function in &service.functions {
            self.function_processor(service, name, function);
        }
    }

    fn root_processor_methods(&mut self, processor: &str) {
        self.open(format!(
            "func (p *{}) AddToProcessorMap(key string, processor thrift.TProcessorFunction) {{",
            processor
        ));
        self.line("p.processorMap[key] = processor");
        self.close("}");
        self.blank();

        self.open(format!(
            "func (p *{}) GetProcessorFunction(key string) (processor thrift.TProcessorFunction, ok bool) {{",
            processor
        ));
        self.line("processor, ok = p.processorMap[key]");
        self.line("return processor, ok");
        self.close("}");
        self.blank();

        self.open(format!(
            "func (p *{}) ProcessorMap() map[string]thrift.TProcessorFunction {{",
            processor
        ));
        self.line("return p.processorMap");
        self.close("}");
        self.blank();

        self.open(format!(
            "func (p *{}) Process(ctx context.Context, iprot, oprot thrift.TProtocol) (success bool, err thrift.TException) {{",
            processor
        ));
        self.line("name, _, seqId, err2 := iprot.ReadMessageBegin(ctx)");
        self.open("if err2 != nil {");
        self.line("return false, thrift.WrapTException(err2)");
        self.close("}");
        self.open("if processor, ok := p.GetProcessorFunction(name); ok {");
        self.line("return processor.Process(ctx, seqId, iprot, oprot)");
        self.close("}");
        self.line("iprot.Skip(ctx, thrift.STRUCT)");
        self.line("iprot.ReadMessageEnd(ctx)");
        self.line(
            "x := thrift.NewTApplicationException(thrift.UNKNOWN_METHOD, \"Unknown function \"+name)",
        );
        self.reply_exception("name", "x");
        self.line("return false, x");
        self.close("}");
        self.blank();
    }

    /// Write `exception` as an EXCEPTION message for `method`.
    fn reply_exception(&mut self, method: &str, exception: &str) {
        self.line(format!(
            "oprot.WriteMessageBegin(ctx, {}, thrift.EXCEPTION, seqId)",
            method
        ));
        self.line(format!("{}.Write(ctx, oprot)", exception));
        self.line("oprot.WriteMessageEnd(ctx)");
        self.line("oprot.Flush(ctx)");
    }

    fn function_processor(&mut self, service: &Service, name: &str, function: &Function) {
        let processor = function_processor(name, function);
        let method = format!("\"{}\"", function.name);
        let args_type = GO_NAMING.type_name(&args_struct_name(&service.name, &function.name));

        self.open(format!("type {} struct {{", processor));
        self.line(format!("handler {}", name));
        self.close("}");
        self.blank();

        self.open(format!(
            "func (p *{}) Process(ctx context.Context, seqId int32, iprot, oprot thrift.TProtocol) (success bool, err thrift.TException) {{",
            processor
        ));
        self.line(format!("args := {}{{}}", args_type));
        self.open("if err2 := args.Read(ctx, iprot); err2 != nil {");
        self.line("iprot.ReadMessageEnd(ctx)");
        if function.oneway {
            self.line("return false, thrift.WrapTException(err2)");
        } else {
            self.line(
                "x := thrift.NewTApplicationException(thrift.PROTOCOL_ERROR, err2.Error())",
            );
            self.reply_exception(&method, "x");
            self.line("return false, thrift.WrapTException(err2)");
        }
        self.close("}");
        self.line("iprot.ReadMessageEnd(ctx)");
        self.blank();

        let call = format!(
            "p.handler.{}({})",
            GO_NAMING.type_name(&function.name),
            handler_arguments(&function.arguments)
        );

        if function.oneway {
            self.open(format!("if err2 := {}; err2 != nil {{", call));
            self.line("return true, thrift.WrapTException(err2)");
            self.close("}");
            self.line("return true, nil");
            self.close("}");
            self.blank();
            return;
        }

        let result_type =
            GO_NAMING.type_name(&result_struct_name(&service.name, &function.name));
        self.line(format!("result := {}{{}}", result_type));
        self.line("var err2 error");
        let returns_value = !function.returns.is_void();
        if returns_value {
            self.line(format!(
                "var retval {}",
                self.mapper.type_name(&function.returns)
            ));
            self.open(format!("if retval, err2 = {}; err2 != nil {{", call));
        } else {
            self.open(format!("if err2 = {}; err2 != nil {{", call));
        }

        if function.exceptions.is_empty() {
            self.internal_error(function);
        } else {
            self.line("switch v := err2.(type) {");
            for exception in &function.exceptions {
                self.line(format!("case {}:", self.mapper.type_name(&exception.ty)));
                self.out.push_indent();
                self.line(format!("result.{} = v", member_name(&exception.name)));
                self.out.push_dedent();
            }
            self.line("default:");
            self.out.push_indent();
            self.internal_error(function);
            self.out.push_dedent();
            self.line("}");
        }

        if returns_value {
            let reference = if is_boxed(&function.returns, Presence::IfSet) {
                "&"
            } else {
                ""
            };
            self.out.push_dedent();
            self.open("} else {");
            self.line(format!("result.Success = {}retval", reference));
        }
        self.close("}");

        self.open(format!(
            "if err2 = oprot.WriteMessageBegin(ctx, {}, thrift.REPLY, seqId); err2 != nil {{",
            method
        ));
        self.line("err = thrift.WrapTException(err2)");
        self.close("}");
        for step in [
            "result.Write(ctx, oprot)",
            "oprot.WriteMessageEnd(ctx)",
            "oprot.Flush(ctx)",
        ] {
            self.open(format!("if err2 = {}; err == nil && err2 != nil {{", step));
            self.line("err = thrift.WrapTException(err2)");
            self.close("}");
        }
        self.open("if err != nil {");
        self.line("return");
        self.close("}");
        self.line("return true, err");
        self.close("}");
        self.blank();
    }

    fn internal_error(&mut self, function: &Function) {
        self.line(format!(
            "x := thrift.NewTApplicationException(thrift.INTERNAL_ERROR, \"Internal error processing {}: \"+err2.Error())",
            function.name
        ));
        self.reply_exception(&format!("\"{}\"", function.name), "x");
        self.line("return true, thrift.WrapTException(err2)");
    }
}

/// Unexported processor type of one function (`calculatorProcessorAdd`).
fn function_processor(service: &str, function: &Function) -> String {
    let mut chars = service.chars();
    let head: String = chars
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default();
    format!(
        "{}{}Processor{}",
        head,
        chars.as_str(),
        GO_NAMING.type_name(&function.name)
    )
}

fn handler_arguments(arguments: &[Field]) -> String {
    let mut args = vec!["ctx".to_string()];
    args.extend(
        arguments
            .iter()
            .map(|arg| format!("args.{}", member_name(&arg.name))),
    );
    args.join(", ")
}

/// `shared.SharedService` → (`shared.`, `SharedService`).
fn split_qualified(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => name.split_at(dot + 1),
        None => ("", name),
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::Type;

    use super::*;

    #[test]
    fn test_function_processor_name() {
        let function = Function::new("add", Type::I32);
        assert_eq!(function_processor("Calculator", &function), "calculatorProcessorAdd");
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("shared.SharedService"), ("shared.", "SharedService"));
        assert_eq!(split_qualified("Base"), ("", "Base"));
    }

    #[test]
    fn test_handler_arguments() {
        let args = vec![
            Field::new(1, "logid", Type::I32),
            Field::new(2, "w", Type::struct_("Work")),
        ];
        assert_eq!(handler_arguments(&args), "ctx, args.Logid, args.W");
    }
}
