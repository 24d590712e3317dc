//! Generation errors.
//!
//! Every error is fatal for the run that produced it. Generation is a pure
//! transform, so nothing is retried.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    #[error("unknown option '{option}' for generator '{generator}'")]
    #[diagnostic(
        code(thriftgen::unknown_option),
        help("run 'thriftgen generators' to list the options of each generator")
    )]
    UnknownOption { generator: String, option: String },

    #[error("invalid value '{value}' for option '{option}' of generator '{generator}'")]
    #[diagnostic(code(thriftgen::invalid_option_value), help("{reason}"))]
    InvalidOptionValue {
        generator: String,
        option: String,
        value: String,
        reason: String,
    },

    #[error("invalid generator spec '{spec}': {reason}")]
    #[diagnostic(
        code(thriftgen::invalid_generator_spec),
        help("expected LANG or LANG:KEY[=VALUE],...")
    )]
    InvalidGeneratorSpec { spec: String, reason: String },

    #[error("unknown generator '{name}'")]
    #[diagnostic(code(thriftgen::unknown_generator), help("available generators: {available}"))]
    UnknownGenerator { name: String, available: String },

    #[error("cannot render {value_kind} value as constant of type '{ty}' ({context})")]
    #[diagnostic(code(thriftgen::unsupported_const_type))]
    UnsupportedConstType {
        ty: String,
        value_kind: String,
        context: String,
    },

    #[error("field '{field}' has unsupported type '{ty}'")]
    #[diagnostic(code(thriftgen::unsupported_field_type))]
    UnsupportedFieldType { field: String, ty: String },

    #[error("'{first}' and '{second}' both render as '{rendered}'")]
    #[diagnostic(
        code(thriftgen::name_collision),
        help("rename one of them; the target language cannot tell them apart")
    )]
    NameCollision {
        first: String,
        second: String,
        rendered: String,
    },

    #[error("type '{name}' is not defined")]
    #[diagnostic(
        code(thriftgen::unknown_type),
        help("check the spelling and that the defining program is included")
    )]
    UnknownType { name: String },

    #[error("'{ident}' is not a member of enum '{enum_name}'")]
    #[diagnostic(code(thriftgen::unknown_constant))]
    UnknownConstant { enum_name: String, ident: String },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(thriftgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub fn unsupported_const(
        ty: &thriftgen_ast::Type,
        value: &thriftgen_ast::ConstValue,
        context: impl Into<String>,
    ) -> Self {
        GenError::UnsupportedConstType {
            ty: ty.to_string(),
            value_kind: value.kind().to_string(),
            context: context.into(),
        }
    }

    pub fn unknown_type(name: impl ToString) -> Self {
        GenError::UnknownType {
            name: name.to_string(),
        }
    }
}
