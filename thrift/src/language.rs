//! Unified backend dispatch.
//!
//! Centralizes backend-specific generator creation and metadata.

use std::{fmt, path::PathBuf};

use thriftgen_ast::Program;
use thriftgen_codegen::{
    GenError,
    language::LanguageCodegen,
    options::{OptionSpec, RawOptions},
};

/// A code generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Go,
    Js,
    Json,
    Graphviz,
}

impl Backend {
    /// Every backend, in the order they are listed to the user.
    pub const ALL: [Backend; 4] = [Backend::Go, Backend::Js, Backend::Json, Backend::Graphviz];

    /// Look up a backend by the name used in `--gen`.
    pub fn from_name(name: &str) -> Result<Self, GenError> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| GenError::UnknownGenerator {
                name: name.to_string(),
                available: Self::ALL.map(Backend::name).join(", "),
            })
    }

    pub fn name(self) -> &'static str {
        self.options().generator
    }

    pub fn description(self) -> &'static str {
        match self {
            Backend::Go => "Go sources for the Apache Thrift Go runtime",
            Backend::Js => "JavaScript for the browser or Node.js",
            Backend::Json => "A JSON description of the program",
            Backend::Graphviz => "A dot graph of declarations and their references",
        }
    }

    /// The options this backend accepts.
    pub fn options(self) -> &'static OptionSpec {
        match self {
            Backend::Go => &thriftgen_codegen_go::OPTIONS,
            Backend::Js => &thriftgen_codegen_js::OPTIONS,
            Backend::Json => &thriftgen_codegen_json::OPTIONS,
            Backend::Graphviz => &thriftgen_codegen_graphviz::OPTIONS,
        }
    }

    /// Output directory used when `--out` is not given.
    pub fn default_out_dir(self) -> PathBuf {
        PathBuf::from(format!("gen-{}", self.name()))
    }

    /// Create a generator for `program`, validating `raw` first.
    pub fn generator<'a>(
        self,
        program: &'a Program,
        raw: &RawOptions,
    ) -> thriftgen_codegen::Result<Box<dyn LanguageCodegen + 'a>> {
        Ok(match self {
            Backend::Go => Box::new(thriftgen_codegen_go::Generator::new(program, raw)?),
            Backend::Js => Box::new(thriftgen_codegen_js::Generator::new(program, raw)?),
            Backend::Json => Box::new(thriftgen_codegen_json::Generator::new(program, raw)?),
            Backend::Graphviz => {
                Box::new(thriftgen_codegen_graphviz::Generator::new(program, raw)?)
            }
        })
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::testing::point_program;

    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Backend::from_name("go").unwrap(), Backend::Go);
        assert_eq!(Backend::from_name("graphviz").unwrap(), Backend::Graphviz);

        let err = Backend::from_name("cobol").unwrap_err();
        match err {
            GenError::UnknownGenerator { name, available } => {
                assert_eq!(name, "cobol");
                assert_eq!(available, "go, js, json, graphviz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_out_dir() {
        assert_eq!(Backend::Js.default_out_dir(), PathBuf::from("gen-js"));
    }

    #[test]
    fn test_generator_validates_options() {
        let program = point_program();
        let raw: RawOptions = "no_such_option".parse().unwrap();
        for backend in Backend::ALL {
            let err = backend.generator(&program, &raw).err().unwrap();
            assert!(matches!(err, GenError::UnknownOption { .. }), "{backend}");
        }
    }

    #[test]
    fn test_generator_reports_its_language() {
        let program = point_program();
        for backend in Backend::ALL {
            let generator = backend.generator(&program, &RawOptions::new()).unwrap();
            assert_eq!(generator.language(), backend.name());
        }
    }
}
