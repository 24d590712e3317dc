//! JSON backend options.

use thriftgen_codegen::{
    Result,
    options::{OptionDef, OptionSpec, RawOptions},
};

/// Options accepted by the JSON backend.
pub const OPTIONS: OptionSpec = OptionSpec {
    generator: "json",
    options: &[OptionDef::flag(
        "merge_includes",
        "Embed included programs instead of listing their names",
    )],
};

/// Validated JSON options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    pub merge_includes: bool,
}

impl JsonOptions {
    pub fn from_raw(raw: &RawOptions) -> Result<Self> {
        OPTIONS.validate(raw)?;
        Ok(Self {
            merge_includes: raw.flag("merge_includes"),
        })
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::GenError;

    use super::*;

    #[test]
    fn test_merge_includes_flag() {
        let raw: RawOptions = "merge_includes".parse().unwrap();
        assert!(JsonOptions::from_raw(&raw).unwrap().merge_includes);
        assert!(!JsonOptions::from_raw(&RawOptions::new()).unwrap().merge_includes);
    }

    #[test]
    fn test_strict_is_not_a_json_option() {
        let raw: RawOptions = "strict".parse().unwrap();
        assert!(matches!(
            JsonOptions::from_raw(&raw),
            Err(GenError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_flag_rejects_value() {
        let raw: RawOptions = "merge_includes=yes".parse().unwrap();
        assert!(matches!(
            JsonOptions::from_raw(&raw),
            Err(GenError::InvalidOptionValue { .. })
        ));
    }
}
