//! Graphviz backend options.

use thriftgen_codegen::{
    Result,
    options::{OptionDef, OptionSpec, RawOptions},
};

/// Options accepted by the Graphviz backend.
pub const OPTIONS: OptionSpec = OptionSpec {
    generator: "graphviz",
    options: &[OptionDef::flag(
        "exceptions",
        "Draw edges from functions to the exceptions they throw",
    )],
};

/// Validated Graphviz options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GvOptions {
    pub exceptions: bool,
}

impl GvOptions {
    pub fn from_raw(raw: &RawOptions) -> Result<Self> {
        OPTIONS.validate(raw)?;
        Ok(Self {
            exceptions: raw.flag("exceptions"),
        })
    }
}
