use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Format;

/// Result type for loader operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the document content and filename, reducing parameter
/// passing in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "tutorial.json");
/// ctx.validation_error("program has no name");
/// ctx.unknown_type_error("Wrok", "field 'w' of Calculator.calculate", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a TOML error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            format: Format::Toml,
            message: source.message().to_string(),
        })
    }

    /// Create a parse error from a JSON error.
    ///
    /// serde_json reports a 1-based line and column; the span points at
    /// that character.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            format: Format::Json,
            message: source.to_string(),
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn duplicate_field_key_error(
        &self,
        owner: impl Into<String>,
        key: i16,
        first: (&str, SourceSpan),
        second: (&str, SourceSpan),
    ) -> Box<Error> {
        Box::new(Error::DuplicateFieldKey {
            src: self.named_source(),
            first_span: first.1,
            second_span: second.1,
            key,
            owner: owner.into(),
            first_field: first.0.to_string(),
            second_field: second.0.to_string(),
        })
    }

    pub fn unknown_type_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownType {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }
}

/// Byte offset of a 1-based line/column position.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset < src.len()).then_some(offset)
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(thriftgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the document format of '{path}'")]
    #[diagnostic(
        code(thriftgen::unknown_format),
        help("documents must have a .json or .toml extension")
    )]
    UnknownFormat { path: PathBuf },

    #[error("failed to parse {format} document: {message}")]
    #[diagnostic(code(thriftgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        format: Format,
        message: String,
    },

    #[error("include cycle: {chain}")]
    #[diagnostic(
        code(thriftgen::include_cycle),
        help("programs cannot include each other, directly or transitively")
    )]
    IncludeCycle { chain: String },

    #[error("field key {key} is used twice in '{owner}'")]
    #[diagnostic(
        code(thriftgen::duplicate_field_key),
        help("give '{second_field}' a key that is not used elsewhere in '{owner}'")
    )]
    DuplicateFieldKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("first used here by '{first_field}'")]
        first_span: SourceSpan,
        #[label("conflicts with first usage")]
        second_span: SourceSpan,
        key: i16,
        owner: String,
        first_field: String,
        second_field: String,
    },

    #[error("unknown type '{name}' in {context}")]
    #[diagnostic(
        code(thriftgen::unknown_type),
        help("types from other documents must name their program and be listed in 'includes'")
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not defined")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(thriftgen::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(thriftgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"name\": 1\n}\n";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 3), Some(4));
        assert_eq!(offset_of(src, 0, 1), None);
        assert_eq!(offset_of(src, 9, 1), None);
    }

    #[test]
    fn test_json_error_has_span() {
        let src = "{\n  \"name\": ,\n}";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let ctx = SourceContext::new(src, "bad.json");

        match *ctx.json_error(err) {
            Error::Parse { span, format, .. } => {
                assert!(span.is_some());
                assert_eq!(format, Format::Json);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
