//! Checks that generated JavaScript parses, using `node --check`.

use thriftgen_codegen::{
    options::RawOptions,
    testing::{NodeChecker, assert_generates_valid_code, point_program, tutorial_program},
};
use thriftgen_codegen_js::{Generator, LanguageCodegen};

fn check(program: thriftgen_ast::Program, options: &str) {
    let raw: RawOptions = options.parse().unwrap();
    assert_generates_valid_code(
        |dir| {
            let generator = Generator::new(&program, &raw)?;
            generator.generate(dir)?;
            Ok(())
        },
        &NodeChecker,
    )
    .unwrap();
}

#[test]
#[ignore = "needs node on PATH"]
fn test_node_modules_parse() {
    check(tutorial_program(), "node,with_ns");
}

#[test]
#[ignore = "needs node on PATH"]
fn test_browser_scripts_parse() {
    check(point_program(), "strict");
}
