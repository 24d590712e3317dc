//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use eyre::{Result, eyre};
use thriftgen_ast::{
    Const, ConstValue, Enum, Field, Function, NamedType, Program, Service, Struct, Type, Typedef,
};

/// The `shared` program of the tutorial: one struct and one service.
pub fn shared_program() -> Program {
    let mut shared = Program::new("shared");
    shared
        .namespaces
        .insert("go".to_string(), "shared".to_string());
    shared.structs.push(
        Struct::new("SharedStruct")
            .field(Field::new(1, "key", Type::I32))
            .field(Field::new(2, "value", Type::string())),
    );
    shared.services.push(
        Service::new("SharedService").function(
            Function::new("getStruct", Type::struct_("SharedStruct"))
                .arg(Field::new(1, "key", Type::I32)),
        ),
    );
    shared
}

/// The tutorial calculator program, including `shared`.
pub fn tutorial_program() -> Program {
    let mut program = Program::new("tutorial");
    program
        .namespaces
        .insert("go".to_string(), "tutorial".to_string());
    program.typedefs.push(Typedef {
        name: "MyInteger".into(),
        target: Type::I32,
        doc: None,
    });
    program.enums.push(
        Enum::new("Operation")
            .value("ADD", 1)
            .value("SUBTRACT", 2)
            .value("MULTIPLY", 3)
            .value("DIVIDE", 4),
    );
    program.consts.push(Const {
        name: "INT32CONSTANT".into(),
        ty: Type::I32,
        value: ConstValue::Integer(9853),
        doc: None,
    });
    program.consts.push(Const {
        name: "MAPCONSTANT".into(),
        ty: Type::map(Type::string(), Type::string()),
        value: ConstValue::Map(vec![
            (
                ConstValue::String("hello".into()),
                ConstValue::String("world".into()),
            ),
            (
                ConstValue::String("goodnight".into()),
                ConstValue::String("moon".into()),
            ),
        ]),
        doc: None,
    });
    program.structs.push(
        Struct::new("Work")
            .field(Field::new(1, "num1", Type::I32).with_default(ConstValue::Integer(0)))
            .field(Field::new(2, "num2", Type::I32))
            .field(Field::new(3, "op", Type::enum_("Operation")))
            .field(Field::new(4, "comment", Type::string()).optional()),
    );
    program.structs.push(
        Struct::exception("InvalidOperation")
            .field(Field::new(1, "whatOp", Type::I32))
            .field(Field::new(2, "why", Type::string())),
    );
    program.services.push(
        Service::new("Calculator")
            .extends(NamedType::external("shared", "SharedService"))
            .function(Function::new("ping", Type::Void))
            .function(
                Function::new("add", Type::I32)
                    .arg(Field::new(1, "num1", Type::I32))
                    .arg(Field::new(2, "num2", Type::I32)),
            )
            .function(
                Function::new("calculate", Type::I32)
                    .arg(Field::new(1, "logid", Type::I32))
                    .arg(Field::new(2, "w", Type::struct_("Work")))
                    .throws(Field::new(1, "ouch", Type::exception("InvalidOperation"))),
            )
            .function(Function::new("zip", Type::Void).oneway()),
    );
    program.includes.push(shared_program());
    program
}

/// A program holding only `Point{1: required i32 x, 2: required i32 y}`.
pub fn point_program() -> Program {
    let mut program = Program::new("geometry");
    program.structs.push(
        Struct::new("Point")
            .field(Field::new(1, "x", Type::I32).required())
            .field(Field::new(2, "y", Type::I32).required()),
    );
    program
}

/// Error from checking generated code with an external tool.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Trait for verifying generated code is syntactically valid.
pub trait CompileChecker {
    /// Check the generated code in the given directory.
    fn check(&self, dir: &Path) -> Result<(), CompileError>;
}

fn run_tool(dir: &Path, program: &str, args: &[&str]) -> Result<String, CompileError> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CompileError {
            message: format!("Failed to run {}: {}", program, e),
            output: String::new(),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() {
        Ok(stdout.into_owned())
    } else {
        Err(CompileError {
            message: format!("{} {} failed", program, args.join(" ")),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// Go syntax checker using `gofmt -l -e`. Only parses, so the thrift
/// runtime need not be installed.
pub struct GoChecker;

impl CompileChecker for GoChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_tool(dir, "gofmt", &["-l", "-e", "."]).map(|_| ())
    }
}

/// JavaScript syntax checker using `node --check` on every `.js` file.
pub struct NodeChecker;

impl CompileChecker for NodeChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        let entries = std::fs::read_dir(dir).map_err(|e| CompileError {
            message: format!("Failed to list {}: {}", dir.display(), e),
            output: String::new(),
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "js") {
                let file = path.to_string_lossy();
                run_tool(dir, "node", &["--check", &file])?;
            }
        }
        Ok(())
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Run a generator and check its output with `checker`.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<()>
where
    C: CompileChecker,
{
    let temp_dir = generate_to_temp(generate)?;

    checker.check(temp_dir.path()).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        if let Ok(entries) = std::fs::read_dir(temp_dir.path()) {
            for entry in entries.flatten() {
                eprintln!("  {}", entry.path().display());
            }
        }
        eyre!("Compile check failed: {}", e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_fixtures_pass_validation() {
        for program in [tutorial_program(), point_program(), shared_program()] {
            let ctx = Pipeline::new().run(program).unwrap();
            assert!(!ctx.has_errors());
        }
    }

    #[test]
    fn test_tutorial_resolves_include() {
        let program = tutorial_program();
        let parent = program.services[0].extends.as_ref().unwrap();
        assert!(program.find_service(parent).is_some());
    }

    #[test]
    #[should_panic(expected = "Content mismatch")]
    fn test_assert_content_eq_reports() {
        assert_content_eq("a\nb\n", "a\nc\n");
    }
}
