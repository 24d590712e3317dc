//! Go backend options.

use thriftgen_ast::Program;
use thriftgen_codegen::{
    Result,
    options::{OptionDef, OptionSpec, RawOptions, STRICT},
    plan::UnknownFields,
};

/// Import path of the Apache Thrift Go runtime.
pub const DEFAULT_THRIFT_IMPORT: &str = "github.com/apache/thrift/lib/go/thrift";

/// Options accepted by the Go backend.
pub const OPTIONS: OptionSpec = OptionSpec {
    generator: "go",
    options: &[
        OptionDef::value(
            "package_prefix",
            "Prefix for the import paths of included programs",
        ),
        OptionDef::value("thrift_import", "Import path of the Thrift runtime library"),
        OptionDef::value("package", "Package name, overriding the go namespace"),
        OptionDef::flag(
            "log_unexpected",
            "Log unexpected field ids and types while reading",
        ),
        STRICT,
    ],
};

/// Validated Go options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoOptions {
    pub package_prefix: String,
    pub thrift_import: String,
    pub package: Option<String>,
    pub log_unexpected: bool,
    pub unknown_fields: UnknownFields,
}

impl Default for GoOptions {
    fn default() -> Self {
        Self {
            package_prefix: String::new(),
            thrift_import: DEFAULT_THRIFT_IMPORT.to_string(),
            package: None,
            log_unexpected: false,
            unknown_fields: UnknownFields::Skip,
        }
    }
}

impl GoOptions {
    pub fn from_raw(raw: &RawOptions) -> Result<Self> {
        OPTIONS.validate(raw)?;

        let mut prefix = raw.value("package_prefix").unwrap_or_default().to_string();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }

        Ok(Self {
            package_prefix: prefix,
            thrift_import: raw
                .value("thrift_import")
                .unwrap_or(DEFAULT_THRIFT_IMPORT)
                .to_string(),
            package: raw.value("package").map(str::to_string),
            log_unexpected: raw.flag("log_unexpected"),
            unknown_fields: UnknownFields::from_strict(raw.flag(STRICT.name)),
        })
    }
}

/// Where a program's code lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackage {
    /// Directory, relative to the output root (`a/b/c`).
    pub path: String,
    /// Package clause name (`c`).
    pub name: String,
}

impl GoPackage {
    /// Package for `program`: the `go` namespace, else the program name.
    pub fn for_program(program: &Program, override_name: Option<&str>) -> Self {
        let namespace = override_name
            .or_else(|| program.namespace("go"))
            .map(str::to_string)
            .unwrap_or_else(|| thriftgen_core::to_snake_case(&program.name));

        let path = namespace.replace('.', "/");
        let name = path
            .rsplit('/')
            .next()
            .unwrap_or(&path)
            .replace('-', "_");
        Self { path, name }
    }

    /// Import path of this package under `prefix`.
    pub fn import_path(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.path)
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::GenError;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = GoOptions::from_raw(&RawOptions::new()).unwrap();
        assert_eq!(options, GoOptions::default());
    }

    #[test]
    fn test_parse_all() {
        let raw: RawOptions = "package_prefix=github.com/acme/gen,thrift_import=x/thrift,strict,log_unexpected"
            .parse()
            .unwrap();
        let options = GoOptions::from_raw(&raw).unwrap();
        assert_eq!(options.package_prefix, "github.com/acme/gen/");
        assert_eq!(options.thrift_import, "x/thrift");
        assert!(options.log_unexpected);
        assert_eq!(options.unknown_fields, UnknownFields::Reject);
    }

    #[test]
    fn test_unknown_option() {
        let raw = RawOptions::new().with("frobnicate", None);
        let err = GoOptions::from_raw(&raw).unwrap_err();
        assert!(matches!(
            err,
            GenError::UnknownOption { ref option, .. } if option == "frobnicate"
        ));
    }

    #[test]
    fn test_package_from_namespace() {
        let mut program = Program::new("tutorial");
        assert_eq!(GoPackage::for_program(&program, None).name, "tutorial");

        program
            .namespaces
            .insert("go".to_string(), "acme.calc".to_string());
        let package = GoPackage::for_program(&program, None);
        assert_eq!(package.path, "acme/calc");
        assert_eq!(package.name, "calc");
        assert_eq!(package.import_path("github.com/x/"), "github.com/x/acme/calc");

        let package = GoPackage::for_program(&program, Some("other"));
        assert_eq!(package.path, "other");
    }
}
