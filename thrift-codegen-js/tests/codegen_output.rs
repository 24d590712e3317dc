//! Text-level checks of the generated JavaScript.

use thriftgen_ast::{Const, ConstValue, Program, Type};
use thriftgen_codegen::{
    GenError,
    options::RawOptions,
    testing::{point_program, tutorial_program},
};
use thriftgen_codegen_js::{Generator, LanguageCodegen, PreviewFile};

fn render(program: &Program, options: &str) -> Vec<PreviewFile> {
    let raw: RawOptions = options.parse().unwrap();
    Generator::new(program, &raw).unwrap().preview().unwrap()
}

fn file<'a>(files: &'a [PreviewFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} was not generated", path))
}

/// Lines from the first one starting with `start` through the next `};`
/// at column zero.
fn section(content: &str, start: &str) -> String {
    let mut lines = content.lines().skip_while(|l| !l.starts_with(start));
    let mut out = Vec::new();
    for line in lines.by_ref() {
        out.push(line);
        if line == "};" {
            break;
        }
    }
    out.join("\n")
}

#[test]
fn test_node_header_and_requires() {
    let files = render(&tutorial_program(), "node");
    let types = file(&files, "tutorial_types.js");
    assert!(types.starts_with("//\n// Autogenerated by thriftgen\n//\n"));
    assert!(types.contains("\"use strict\";\n"));
    assert!(types.contains("const thrift = require(\"thrift\");\nconst Thrift = thrift.Thrift;\n"));
    assert!(types.contains("const shared_ttypes = require(\"./shared_types\");\n"));
}

#[test]
fn test_enum_object() {
    let files = render(&tutorial_program(), "node");
    let types = file(&files, "tutorial_types.js");
    insta::assert_snapshot!(section(types, "const Operation"), @r#"
    const Operation = module.exports.Operation = {
      "ADD": 1,
      "SUBTRACT": 2,
      "MULTIPLY": 3,
      "DIVIDE": 4,
    };
    "#);
}

#[test]
fn test_constants_follow_classes() {
    let files = render(&tutorial_program(), "node");
    let types = file(&files, "tutorial_types.js");
    assert!(types.contains(
        "const MAPCONSTANT = module.exports.MAPCONSTANT = {\"hello\": \"world\", \"goodnight\": \"moon\"};\n"
    ));
    assert!(types.contains("const INT32CONSTANT = module.exports.INT32CONSTANT = 9853;\n"));

    let constant = types.find("const INT32CONSTANT").unwrap();
    let class = types.find("const Work = module.exports.Work = class {").unwrap();
    assert!(class < constant);
}

#[test]
fn test_constructor_applies_defaults_then_args() {
    let files = render(&tutorial_program(), "node");
    let work = section(file(&files, "tutorial_types.js"), "const Work");
    assert!(work.contains("    this.num1 = 0;\n    this.num2 = null;\n"));
    assert!(work.contains(
        "      if (args.num1 !== undefined && args.num1 !== null) {\n        this.num1 = args.num1;\n"
    ));
}

#[test]
fn test_exception_extends_texception() {
    let files = render(&tutorial_program(), "node");
    let exception = section(file(&files, "tutorial_types.js"), "const InvalidOperation");
    assert!(exception.starts_with(
        "const InvalidOperation = module.exports.InvalidOperation = class extends Thrift.TException {"
    ));
    assert!(exception.contains("    super(args);\n    this.name = \"InvalidOperation\";\n"));
}

#[test]
fn test_reader_validates_required_fields() {
    let files = render(&point_program(), "node");
    let point = section(file(&files, "geometry_types.js"), "const Point");
    assert!(point.contains(
        "        case 1:\n          if (ftype == Thrift.Type.I32) {\n            this.x = input.readI32();\n"
    ));
    assert!(point.contains("        default:\n          input.skip(ftype);\n"));
    assert!(point.contains("    input.readStructEnd();\n    this.validate();\n"));
    assert!(point.contains(
        "throw new Thrift.TProtocolException(Thrift.TProtocolExceptionType.INVALID_DATA, \"Required field y is unset!\");"
    ));
}

#[test]
fn test_strict_rejects_unknown_fields() {
    let lenient = render(&point_program(), "node");
    let strict = render(&point_program(), "node,strict");
    let message = "\"Unknown field id \" + fid + \" in Point\"";
    assert!(!file(&lenient, "geometry_types.js").contains(message));
    assert!(file(&strict, "geometry_types.js").contains(message));
}

#[test]
fn test_writer_guards_every_field() {
    let files = render(&tutorial_program(), "node");
    let work = section(file(&files, "tutorial_types.js"), "const Work");
    assert!(work.contains("    output.writeStructBegin(\"Work\");\n"));
    assert!(work.contains(
        "    if (this.num1 !== null && this.num1 !== undefined) {\n      output.writeFieldBegin(\"num1\", Thrift.Type.I32, 1);\n      output.writeI32(this.num1);\n      output.writeFieldEnd();\n    }\n"
    ));
    assert!(work.contains("output.writeFieldStop();\n    output.writeStructEnd();\n"));
}

#[test]
fn test_result_writes_one_field() {
    let files = render(&tutorial_program(), "node");
    let service = file(&files, "Calculator.js");
    let result = section(service, "const Calculator_calculate_result = class {");
    assert!(result.contains("    if (this.success !== null && this.success !== undefined) {\n"));
    assert!(result.contains("    } else if (this.ouch !== null && this.ouch !== undefined) {\n"));
}

#[test]
fn test_service_extends_parent_module() {
    let files = render(&tutorial_program(), "node");
    let service = file(&files, "Calculator.js");
    assert!(service.contains("const SharedService = require(\"./SharedService\");\n"));
    assert!(service.contains("const ttypes = require(\"./tutorial_types\");\n"));
    assert!(service.contains(
        "const CalculatorClient = exports.Client = class extends SharedService.Client {\n"
    ));
    assert!(service.contains(
        "const CalculatorProcessor = exports.Processor = class extends SharedService.Processor {\n"
    ));
    assert!(service.contains("    super(output, pClass);\n"));
    // seqid bookkeeping is inherited
    assert!(!service.contains("new_seqid() {"));
}

#[test]
fn test_client_surfaces_declared_exceptions() {
    let files = render(&tutorial_program(), "node");
    let service = file(&files, "Calculator.js");
    assert!(service.contains(
        "    if (result.ouch !== null) {\n      return callback(result.ouch);\n    }\n"
    ));
    assert!(service.contains("return callback(\"calculate failed: unknown result\");"));
    assert!(service.contains("   * @param {ttypes.Work} w\n   * @returns {Promise<number>}\n"));
}

#[test]
fn test_processor_maps_exceptions() {
    let files = render(&tutorial_program(), "node");
    let service = file(&files, "Calculator.js");
    assert!(service.contains(
        "Promise.resolve(this._handler.calculate(args.logid, args.w)).then(success => {"
    ));
    assert!(service.contains("      if (err instanceof ttypes.InvalidOperation) {\n"));
    assert!(service.contains("result = new Calculator_calculate_result({\"ouch\": err});"));
    assert!(service.contains("Thrift.TApplicationExceptionType.UNKNOWN, err.message"));
}

#[test]
fn test_oneway_has_no_reply() {
    let files = render(&tutorial_program(), "node");
    let service = file(&files, "Calculator.js");
    assert!(service.contains(
        "output.writeMessageBegin(\"zip\", Thrift.MessageType.ONEWAY, this.seqid());"
    ));
    assert!(!service.contains("recv_zip"));
    assert!(!service.contains("Calculator_zip_result"));
    assert!(service.contains("    this._handler.zip();\n  }\n"));
}

#[test]
fn test_browser_globals() {
    let files = render(&tutorial_program(), "");
    let types = file(&files, "tutorial_types.js");
    assert!(!types.contains("require("));
    assert!(types.contains("var Operation = {\n"));
    assert!(types.contains("var Work = class {\n"));

    let service = file(&files, "Calculator.js");
    assert!(service.contains("var CalculatorClient = class extends SharedServiceClient {\n"));
    assert!(service.contains(
        "const args = new Calculator_add_args({\"num1\": num1, \"num2\": num2});"
    ));
}

#[test]
fn test_browser_namespace_objects() {
    let mut program = tutorial_program();
    program
        .namespaces
        .insert("js".to_string(), "calc.api".to_string());
    let files = render(&program, "");
    let types = file(&files, "tutorial_types.js");
    assert!(types.contains("var calc = calc || {};\ncalc.api = calc.api || {};\n"));
    assert!(types.contains("calc.api.Work = class {\n"));
    assert!(types.contains("calc.api.INT32CONSTANT = 9853;\n"));

    let service = file(&files, "Calculator.js");
    assert!(service.contains("const result = new calc.api.Calculator_add_result();"));
}

#[test]
fn test_with_ns_mirrors_exports() {
    let files = render(&tutorial_program(), "node,with_ns");
    let types = file(&files, "tutorial_types.js");
    assert!(types.contains("global.tutorial = global.tutorial || {};\n"));
    assert!(types.ends_with("Object.assign(global.tutorial, module.exports);\n"));

    let service = file(&files, "Calculator.js");
    assert!(service.contains("global.tutorial.CalculatorClient = CalculatorClient;\n"));
    assert!(service.contains("global.tutorial.CalculatorProcessor = CalculatorProcessor;\n"));
}

#[test]
fn test_option_errors() {
    let program = tutorial_program();
    let with_ns: RawOptions = "with_ns".parse().unwrap();
    assert!(matches!(
        Generator::new(&program, &with_ns).err().unwrap(),
        GenError::InvalidOptionValue { .. }
    ));
    let unknown: RawOptions = "ts".parse().unwrap();
    assert!(matches!(
        Generator::new(&program, &unknown).err().unwrap(),
        GenError::UnknownOption { .. }
    ));
}

#[test]
fn test_unsupported_const_fails() {
    let mut program = Program::new("consts");
    program.consts.push(Const {
        name: "BAD".into(),
        ty: Type::list(Type::I32),
        value: ConstValue::Integer(1),
        doc: None,
    });
    let generator = Generator::new(&program, &RawOptions::new()).unwrap();
    assert!(matches!(
        generator.preview().unwrap_err(),
        GenError::UnsupportedConstType { .. }
    ));
}
