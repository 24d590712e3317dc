//! JavaScript backend options.

use thriftgen_codegen::{
    GenError, Result,
    options::{OptionDef, OptionSpec, RawOptions, STRICT},
    plan::UnknownFields,
};

/// Options accepted by the JavaScript backend.
pub const OPTIONS: OptionSpec = OptionSpec {
    generator: "js",
    options: &[
        OptionDef::flag("node", "Generate CommonJS modules for node.js"),
        OptionDef::flag(
            "with_ns",
            "Also publish declarations on global namespace objects (node only)",
        ),
        STRICT,
    ],
};

/// Validated JavaScript options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsOptions {
    /// CommonJS modules instead of browser globals.
    pub node: bool,
    pub with_ns: bool,
    pub unknown_fields: UnknownFields,
}

impl JsOptions {
    pub fn from_raw(raw: &RawOptions) -> Result<Self> {
        OPTIONS.validate(raw)?;

        let options = Self {
            node: raw.flag("node"),
            with_ns: raw.flag("with_ns"),
            unknown_fields: UnknownFields::from_strict(raw.flag(STRICT.name)),
        };

        // Browser output always lives in the namespace objects already.
        if options.with_ns && !options.node {
            return Err(GenError::InvalidOptionValue {
                generator: OPTIONS.generator.to_string(),
                option: "with_ns".to_string(),
                value: "true".to_string(),
                reason: "with_ns requires the node option".to_string(),
            });
        }
        Ok(options)
    }
}
