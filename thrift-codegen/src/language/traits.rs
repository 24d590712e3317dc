//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::Result;
use thriftgen_ast::{BaseType, NamedType, Type};
use thriftgen_core::{File, WriteResult};

use crate::classify::{Category, classify};

/// Trait for backend code generators.
///
/// Implement this trait to add support for generating code in a new
/// target language. Construction of the implementing type is where
/// options are validated, so an instance is always ready to run.
pub trait LanguageCodegen {
    /// Backend identifier (e.g., "go", "js", "json")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "go", "js", "gv")
    fn file_extension(&self) -> &'static str;

    /// Render every output file without writing to disk.
    fn preview(&self) -> crate::Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory.
    ///
    /// All files are rendered before the first one is written, so a
    /// generation error leaves the output directory untouched.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        write_files(self.preview()?, output_dir)
    }
}

/// Write rendered files under `output_dir`, leaving files whose content
/// is already current untouched.
pub fn write_files(files: Vec<PreviewFile>, output_dir: &Path) -> Result<GenerateResult> {
    let mut result = GenerateResult::default();

    for file in files {
        let path = output_dir.join(&file.path);
        match File::new(&path, file.content).write()? {
            WriteResult::Written => result.written.push(path),
            WriteResult::Unchanged => result.unchanged.push(path),
        }
    }

    Ok(result)
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were (re)written
    pub written: Vec<PathBuf>,
    /// Files whose content did not change
    pub unchanged: Vec<PathBuf>,
}

impl GenerateResult {
    /// Total number of files produced.
    pub fn file_count(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

impl PreviewFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// What a [`NamedType`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKind {
    Enum,
    Struct,
    Exception,
}

/// Trait for rendering Thrift types as target-language type syntax.
///
/// Implementors provide the leaf forms; [`TypeMapper::type_name`] does the
/// recursion over containers and typedefs.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Return type used for `void` functions.
    fn void_type(&self) -> String;

    /// Map a base type.
    fn base_type(&self, base: BaseType) -> String;

    /// Map a reference to a struct, exception or enum, qualifying it when
    /// it lives in another program.
    fn named_type(&self, named: &NamedType, kind: NamedKind) -> String;

    fn list_type(&self, elem: String) -> String;

    fn set_type(&self, elem: String) -> String;

    fn map_type(&self, key: String, value: String) -> String;

    /// Name under which a typedef is visible in the target language.
    ///
    /// Returning `None` renders the typedef's target instead.
    fn typedef_name(&self, _name: &str, _program: Option<&str>, _target: &Type) -> Option<String> {
        None
    }

    /// Render a full type.
    fn type_name(&self, ty: &Type) -> String {
        if let Type::Typedef {
            name,
            program,
            target,
        } = ty
            && let Some(alias) = self.typedef_name(name, program.as_deref(), target)
        {
            return alias;
        }

        match classify(ty) {
            Category::Void => self.void_type(),
            Category::Base(base) => self.base_type(base),
            Category::Enum(named) => self.named_type(named, NamedKind::Enum),
            Category::Struct(named) => self.named_type(named, NamedKind::Struct),
            Category::Exception(named) => self.named_type(named, NamedKind::Exception),
            Category::List(elem) => self.list_type(self.type_name(elem)),
            Category::Set(elem) => self.set_type(self.type_name(elem)),
            Category::Map(key, value) => {
                self.map_type(self.type_name(key), self.type_name(value))
            }
        }
    }
}
