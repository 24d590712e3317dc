//! Loading of serialized Thrift AST documents.
//!
//! A document is a JSON or TOML rendering of [`Program`] plus an optional
//! `includes` list of other documents, resolved relative to the including
//! file. Loading parses the document, resolves includes recursively,
//! rejects include cycles and validates the result.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use error::{Error, Result, SourceContext};
use serde::Deserialize;
use thriftgen_ast::Program;
use tracing::{debug, trace};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Toml => f.write_str("TOML"),
        }
    }
}

/// The part of a document that is not the program itself.
#[derive(Debug, Default, Deserialize)]
struct IncludeList {
    #[serde(default)]
    includes: Vec<PathBuf>,
}

/// Load a document and everything it includes.
pub fn load_file(path: impl AsRef<Path>) -> Result<Program> {
    Loader::default().load(path.as_ref())
}

/// Parse and validate a single document from a string. Includes are not
/// allowed since there is no directory to resolve them against.
pub fn parse_str(content: &str, format: Format, filename: &str) -> Result<Program> {
    let source = SourceContext::new(content, filename);
    let (program, includes) = parse(&source, format)?;

    if !includes.includes.is_empty() {
        return Err(source.validation_error(
            "documents parsed from a string cannot have includes",
        ));
    }

    validate::validate_program(&program, &source)?;
    Ok(program)
}

fn parse(source: &SourceContext, format: Format) -> Result<(Program, IncludeList)> {
    let content = source.src();
    match format {
        Format::Json => {
            let program = serde_json::from_str(content).map_err(|e| source.json_error(e))?;
            let includes = serde_json::from_str(content).map_err(|e| source.json_error(e))?;
            Ok((program, includes))
        }
        Format::Toml => {
            let program = toml::from_str(content).map_err(|e| source.toml_error(e))?;
            let includes = toml::from_str(content).map_err(|e| source.toml_error(e))?;
            Ok((program, includes))
        }
    }
}

/// Recursive loader. `stack` holds the documents currently being loaded,
/// outermost first.
#[derive(Debug, Default)]
struct Loader {
    stack: Vec<PathBuf>,
}

impl Loader {
    fn load(&mut self, path: &Path) -> Result<Program> {
        let io_error = |source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let canonical = path.canonicalize().map_err(io_error)?;

        if let Some(start) = self.stack.iter().position(|p| *p == canonical) {
            let chain: Vec<String> = self.stack[start..]
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| display_name(p))
                .collect();
            return Err(Box::new(Error::IncludeCycle {
                chain: chain.join(" -> "),
            }));
        }

        let format = Format::from_path(path).ok_or_else(|| {
            Box::new(Error::UnknownFormat {
                path: path.to_path_buf(),
            })
        })?;
        let content = std::fs::read_to_string(path).map_err(io_error)?;
        let source = SourceContext::new(content, path.display().to_string());

        debug!(path = %path.display(), %format, "loading document");
        let (mut program, includes) = parse(&source, format)?;
        if program.name.is_empty() {
            program.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        self.stack.push(canonical);
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for include in &includes.includes {
            trace!(from = %program.name, include = %include.display(), "resolving include");
            let included = self.load(&base.join(include))?;
            program.includes.push(included);
        }
        self.stack.pop();

        validate::validate_program(&program, &source)?;
        Ok(program)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use thriftgen_ast::{ConstValue, Requiredness, Type};

    use super::*;

    const SHARED: &str = r#"{
  "structs": [
    {
      "name": "SharedStruct",
      "fields": [
        {"key": 1, "name": "key", "type": {"kind": "i32"}},
        {"key": 2, "name": "value", "type": {"kind": "string", "binary": false}}
      ]
    }
  ],
  "services": [{"name": "SharedService"}]
}"#;

    const TUTORIAL: &str = r#"{
  "name": "tutorial",
  "includes": ["shared.json"],
  "namespaces": {"go": "tutorial", "js": "tutorial"},
  "enums": [
    {"name": "Operation", "values": [{"name": "ADD", "value": 1}, {"name": "SUBTRACT", "value": 2}]}
  ],
  "consts": [
    {"name": "INT32CONSTANT", "type": {"kind": "i32"}, "value": {"integer": 9853}}
  ],
  "structs": [
    {
      "name": "Work",
      "fields": [
        {"key": 1, "name": "num1", "type": {"kind": "i32"}, "default": {"integer": 0}},
        {"key": 3, "name": "op", "type": {"kind": "enum", "name": "Operation"}, "requiredness": "required"},
        {"key": 4, "name": "comment", "type": {"kind": "string", "binary": false}, "requiredness": "optional"}
      ]
    }
  ],
  "services": [
    {"name": "Calculator", "extends": {"name": "SharedService", "program": "shared"}}
  ]
}"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_with_include() {
        let dir = TempDir::new().unwrap();
        write(&dir, "shared.json", SHARED);
        let path = write(&dir, "tutorial.json", TUTORIAL);

        let program = load_file(&path).unwrap();
        assert_eq!(program.name, "tutorial");
        assert_eq!(program.includes.len(), 1);
        assert_eq!(program.includes[0].name, "shared");
        assert_eq!(program.namespace("go"), Some("tutorial"));

        let work = &program.structs[0];
        assert_eq!(work.fields[1].requiredness, Requiredness::Required);
        assert_eq!(work.fields[0].default, Some(ConstValue::Integer(0)));
        assert_eq!(work.fields[1].ty, Type::enum_("Operation"));
    }

    #[test]
    fn test_include_cycle() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", r#"{"includes": ["b.json"]}"#);
        let path = write(&dir, "b.json", r#"{"includes": ["a.json"]}"#);

        let err = load_file(&path).unwrap_err();
        match *err {
            Error::IncludeCycle { chain } => assert_eq!(chain, "b.json -> a.json -> b.json"),
            other => panic!("expected include cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_include() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tutorial.json", TUTORIAL);
        assert!(matches!(*load_file(&path).unwrap_err(), Error::Io { .. }));
    }

    #[test]
    fn test_toml_document() {
        let content = r#"
name = "geometry"

[[structs]]
name = "Point"

[[structs.fields]]
key = 1
name = "x"
requiredness = "required"
type = { kind = "i32" }

[[structs.fields]]
key = 2
name = "y"
requiredness = "required"
type = { kind = "i32" }
"#;
        let program = parse_str(content, Format::Toml, "geometry.toml").unwrap();
        let point = &program.structs[0];
        assert_eq!(point.fields.len(), 2);
        assert!(point.fields.iter().all(|f| f.requiredness.is_required()));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_str(r#"{"structs": [}"#, Format::Json, "bad.json").unwrap_err();
        assert!(matches!(*err, Error::Parse { format: Format::Json, .. }));
    }

    #[test]
    fn test_unknown_format() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tutorial.thrift", "struct Work {}");
        assert!(matches!(*load_file(&path).unwrap_err(), Error::UnknownFormat { .. }));
    }

    #[test]
    fn test_name_defaults_to_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "shared.json", SHARED);
        assert_eq!(load_file(&path).unwrap().name, "shared");
    }
}
