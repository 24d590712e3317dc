use thriftgen_ast::Program;
use thriftgen_codegen::{
    Result,
    driver::walk_program,
    language::{LanguageCodegen, PreviewFile},
    options::RawOptions,
};
use tracing::debug;

use crate::{emit::JsonEmitter, options::JsonOptions};

/// Describes a program as one JSON document, `<program>.json`.
///
/// The output is data, not code: it is meant for tools that want the
/// program structure without parsing Thrift.
pub struct Generator<'a> {
    program: &'a Program,
    options: JsonOptions,
}

impl<'a> Generator<'a> {
    /// Validate `raw` and prepare the generator.
    pub fn new(program: &'a Program, raw: &RawOptions) -> Result<Self> {
        let options = JsonOptions::from_raw(raw)?;
        Ok(Self::with_options(program, options))
    }

    pub fn with_options(program: &'a Program, options: JsonOptions) -> Self {
        Self { program, options }
    }

    /// The document as a value, for callers that post-process it.
    pub fn document(&self) -> Result<serde_json::Value> {
        let mut emitter = JsonEmitter::new(self.program, &self.options);
        walk_program(self.program, &mut emitter)?;
        Ok(emitter.into_document())
    }
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let document = self.document()?;
        let path = format!("{}.{}", self.program.name, self.file_extension());
        debug!(path = %path, merged = self.options.merge_includes, "rendered json document");
        Ok(vec![PreviewFile::new(path, format!("{:#}\n", document))])
    }
}
