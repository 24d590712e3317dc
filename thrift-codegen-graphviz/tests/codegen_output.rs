//! Text-level checks of the generated dot source.

use thriftgen_ast::Program;
use thriftgen_codegen::{
    GenError,
    options::RawOptions,
    testing::{point_program, tutorial_program},
};
use thriftgen_codegen_graphviz::{Generator, LanguageCodegen};

fn render(program: &Program, options: &str) -> String {
    let raw: RawOptions = options.parse().unwrap();
    let mut files = Generator::new(program, &raw).unwrap().preview().unwrap();
    assert_eq!(files.len(), 1);
    files.remove(0).content
}

#[test]
fn test_single_struct_graph() {
    insta::assert_snapshot!(render(&point_program(), ""), @r#"
    // Autogenerated by thriftgen
    digraph "geometry" {
      graph [rankdir=LR];
      node [style=filled, shape=record];
      edge [arrowsize=0.5];
      "Point" [label="struct Point|<field_x>required x :: i32|<field_y>required y :: i32", fillcolor=beige];
    }
    "#);
}

#[test]
fn test_declaration_nodes() {
    let gv = render(&tutorial_program(), "");
    assert!(gv.contains("  \"MyInteger\" [label=\"typedef MyInteger|i32\", fillcolor=azure];\n"));
    assert!(gv.contains(
        "  \"Operation\" [label=\"enum Operation|<ADD>ADD = 1|<SUBTRACT>SUBTRACT = 2|<MULTIPLY>MULTIPLY = 3|<DIVIDE>DIVIDE = 4\", fillcolor=white];\n"
    ));
    assert!(gv.contains(
        "\"InvalidOperation\" [label=\"exception InvalidOperation|<field_whatOp>whatOp :: i32|<field_why>why :: string\", fillcolor=lightpink];"
    ));
    assert!(gv.contains("<field_comment>optional comment :: string"));
}

#[test]
fn test_constant_labels_are_escaped() {
    let gv = render(&tutorial_program(), "");
    assert!(gv.contains(
        r#""const_MAPCONSTANT" [label="const MAPCONSTANT :: map\<string,string\>|\{\"hello\": \"world\", \"goodnight\": \"moon\"\}", fillcolor=aliceblue];"#
    ));
    assert!(gv.contains(
        r#""const_INT32CONSTANT" [label="const INT32CONSTANT :: i32|9853", fillcolor=aliceblue];"#
    ));
}

#[test]
fn test_service_cluster() {
    let gv = render(&tutorial_program(), "");
    assert!(gv.contains(
        "  subgraph \"cluster_Calculator\" {\n    label=\"service Calculator\";\n    style=dashed;\n"
    ));
    assert!(gv.contains(
        "    \"Calculator.calculate\" [label=\"<return_type>function calculate :: i32|<param_logid>logid :: i32|<param_w>w :: Work\", fillcolor=bisque];\n"
    ));
    assert!(gv.contains("<return_type>oneway function zip :: void"));
}

#[test]
fn test_edges_follow_clusters() {
    let gv = render(&tutorial_program(), "");
    let field_edge = gv.find("  \"Work\":field_op -> \"Operation\";\n").unwrap();
    let cluster_end = gv.find("\n  }\n").unwrap();
    assert!(cluster_end < field_edge);

    assert!(gv.contains("  \"Calculator.calculate\":param_w -> \"Work\";\n"));
    assert!(gv.contains("  \"Calculator\" -> \"shared.SharedService\" [style=bold];\n"));
    assert!(gv.ends_with("\n}\n"));
}

#[test]
fn test_exception_edges_are_optional() {
    let edge = "\"Calculator.calculate\" -> \"InvalidOperation\" [style=dashed];";
    assert!(!render(&tutorial_program(), "").contains(edge));
    assert!(render(&tutorial_program(), "exceptions").contains(edge));
}

#[test]
fn test_unknown_option_fails() {
    let program = tutorial_program();
    let raw: RawOptions = "strict".parse().unwrap();
    let err = Generator::new(&program, &raw).err().unwrap();
    assert!(matches!(err, GenError::UnknownOption { .. }));
}
