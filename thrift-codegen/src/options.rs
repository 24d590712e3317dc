//! Backend options.
//!
//! Options reach a backend as a flat ordered map of names to optional
//! values ([`RawOptions`]), usually parsed from a command-line
//! [`GeneratorSpec`] such as `go:package_prefix=example.com/gen/,strict`.
//! Each backend declares what it accepts in an [`OptionSpec`] and
//! validates eagerly, before any output exists.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{GenError, Result};

/// Options as given, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    entries: IndexMap<String, Option<String>>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a flag (`None`) or a key/value pair. Later entries win.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.insert(key, value.map(str::to_string));
        self
    }

    /// True if `key` was given at all.
    pub fn flag(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The value given for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for RawOptions {
    type Err = GenError;

    /// Parse `key[=value],...`. Empty items are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut options = RawOptions::new();
        for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            match item.split_once('=') {
                Some((key, value)) => options.insert(key.trim(), Some(value.trim().to_string())),
                None => options.insert(item, None),
            }
        }
        Ok(options)
    }
}

/// A backend name plus its options, as written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub language: String,
    pub options: RawOptions,
}

impl FromStr for GeneratorSpec {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        let (language, options) = s.split_once(':').unwrap_or((s, ""));
        let language = language.trim();

        if language.is_empty() {
            return Err(GenError::InvalidGeneratorSpec {
                spec: s.to_string(),
                reason: "missing generator name".to_string(),
            });
        }
        if let Some((key, _)) = options.split(',').find_map(|i| i.split_once('='))
            && key.trim().is_empty()
        {
            return Err(GenError::InvalidGeneratorSpec {
                spec: s.to_string(),
                reason: "option without a name".to_string(),
            });
        }

        Ok(Self {
            language: language.to_string(),
            options: options.parse()?,
        })
    }
}

impl fmt::Display for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        for (i, (key, value)) in self.options.iter().enumerate() {
            f.write_str(if i == 0 { ":" } else { "," })?;
            f.write_str(key)?;
            if let Some(value) = value {
                write!(f, "={}", value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Present or absent, takes no value.
    Flag,
    /// Requires a value.
    Value,
}

/// One accepted option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    pub name: &'static str,
    pub kind: OptionKind,
    pub help: &'static str,
}

impl OptionDef {
    pub const fn flag(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Flag,
            help,
        }
    }

    pub const fn value(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Value,
            help,
        }
    }
}

/// Shared by every backend that emits serialization code.
pub const STRICT: OptionDef = OptionDef::flag(
    "strict",
    "Fail on unknown field ids when reading instead of skipping them",
);

/// The options a backend accepts.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub generator: &'static str,
    pub options: &'static [OptionDef],
}

impl OptionSpec {
    pub fn find(&self, name: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Check every given option against the accepted set.
    pub fn validate(&self, raw: &RawOptions) -> Result<()> {
        for (key, value) in raw.iter() {
            let def = self.find(key).ok_or_else(|| GenError::UnknownOption {
                generator: self.generator.to_string(),
                option: key.to_string(),
            })?;

            match (def.kind, value) {
                (OptionKind::Flag, Some(value)) => {
                    return Err(self.invalid(
                        key,
                        value,
                        "this option is a flag and takes no value",
                    ));
                }
                (OptionKind::Value, None | Some("")) => {
                    return Err(self.invalid(key, "", "this option requires a value"));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn invalid(&self, option: &str, value: &str, reason: &str) -> GenError {
        GenError::InvalidOptionValue {
            generator: self.generator.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: OptionSpec = OptionSpec {
        generator: "go",
        options: &[
            OptionDef::value("package_prefix", "Prefix for import paths"),
            STRICT,
        ],
    };

    #[test]
    fn test_parse_spec_with_options() {
        let spec: GeneratorSpec = "go:package_prefix=example.com/gen/,strict".parse().unwrap();
        assert_eq!(spec.language, "go");
        assert_eq!(spec.options.value("package_prefix"), Some("example.com/gen/"));
        assert!(spec.options.flag("strict"));
        assert_eq!(spec.options.value("strict"), None);
        assert_eq!(spec.to_string(), "go:package_prefix=example.com/gen/,strict");
    }

    #[test]
    fn test_parse_bare_language() {
        let spec: GeneratorSpec = "json".parse().unwrap();
        assert_eq!(spec.language, "json");
        assert!(spec.options.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_names() {
        assert!(matches!(
            ":strict".parse::<GeneratorSpec>(),
            Err(GenError::InvalidGeneratorSpec { .. })
        ));
        assert!("go:=x".parse::<GeneratorSpec>().is_err());
    }

    #[test]
    fn test_validate_unknown_option() {
        let raw = RawOptions::new().with("bogus", None);
        let err = SPEC.validate(&raw).unwrap_err();
        assert!(matches!(
            err,
            GenError::UnknownOption { generator, option } if generator == "go" && option == "bogus"
        ));
    }

    #[test]
    fn test_validate_kinds() {
        assert!(SPEC.validate(&RawOptions::new().with("strict", None)).is_ok());
        assert!(matches!(
            SPEC.validate(&RawOptions::new().with("strict", Some("yes"))),
            Err(GenError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            SPEC.validate(&RawOptions::new().with("package_prefix", None)),
            Err(GenError::InvalidOptionValue { .. })
        ));
    }
}
