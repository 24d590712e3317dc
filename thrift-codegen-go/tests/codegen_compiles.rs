//! Checks that generated Go parses, using `gofmt`.

use thriftgen_codegen::{
    options::RawOptions,
    testing::{GoChecker, assert_generates_valid_code, point_program, tutorial_program},
};
use thriftgen_codegen_go::{Generator, LanguageCodegen};

fn check(program: thriftgen_ast::Program, options: &str) {
    let raw: RawOptions = options.parse().unwrap();
    assert_generates_valid_code(
        |dir| {
            let generator = Generator::new(&program, &raw)?;
            generator.generate(dir)?;
            Ok(())
        },
        &GoChecker,
    )
    .unwrap();
}

#[test]
#[ignore = "needs gofmt on PATH"]
fn test_tutorial_parses() {
    check(tutorial_program(), "");
}

#[test]
#[ignore = "needs gofmt on PATH"]
fn test_strict_logging_parses() {
    check(point_program(), "strict,log_unexpected");
}
