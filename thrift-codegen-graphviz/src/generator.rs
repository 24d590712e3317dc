use thriftgen_ast::Program;
use thriftgen_codegen::{
    Result,
    driver::walk_program,
    language::{LanguageCodegen, PreviewFile},
    options::RawOptions,
};
use thriftgen_core::GENERATOR_NAME;
use tracing::debug;

use crate::{emit::GvEmitter, options::GvOptions, type_mapper::GvTypeMapper};

/// Draws a program as a Graphviz digraph, `<program>.gv`.
pub struct Generator<'a> {
    program: &'a Program,
    options: GvOptions,
    mapper: GvTypeMapper,
}

impl<'a> Generator<'a> {
    /// Validate `raw` and prepare the generator.
    pub fn new(program: &'a Program, raw: &RawOptions) -> Result<Self> {
        let options = GvOptions::from_raw(raw)?;
        Ok(Self::with_options(program, options))
    }

    pub fn with_options(program: &'a Program, options: GvOptions) -> Self {
        Self {
            program,
            options,
            mapper: GvTypeMapper::new(program.name.as_str()),
        }
    }
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "graphviz"
    }

    fn file_extension(&self) -> &'static str {
        "gv"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let mut emitter = GvEmitter::new(self.program, &self.options, &self.mapper);
        walk_program(self.program, &mut emitter)?;

        let path = format!("{}.{}", self.program.name, self.file_extension());
        debug!(path = %path, "rendered graphviz source");
        let content = format!(
            "// Autogenerated by {}\n{}",
            GENERATOR_NAME,
            emitter.into_source()
        );
        Ok(vec![PreviewFile::new(path, content)])
    }
}
