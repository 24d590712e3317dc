//! Generators command report data structures.

use thriftgen_codegen::options::{OptionKind, OptionSpec};

use super::output::{Output, Report};

/// One backend and the options it accepts.
#[derive(Debug)]
pub struct BackendInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static OptionSpec,
}

/// Report listing every available backend.
#[derive(Debug)]
pub struct GeneratorsReport {
    pub backends: Vec<BackendInfo>,
}

impl Report for GeneratorsReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, backend) in self.backends.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.key_value(backend.name, backend.description);
            for option in backend.options.options {
                let usage = match option.kind {
                    OptionKind::Flag => option.name.to_string(),
                    OptionKind::Value => format!("{}=VALUE", option.name),
                };
                out.list_item(&format!("{:<24} {}", usage, option.help));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::options::OptionDef;

    use super::*;
    use crate::reports::BufferOutput;

    const SPEC: OptionSpec = OptionSpec {
        generator: "demo",
        options: &[
            OptionDef::flag("strict", "Fail on unknown fields"),
            OptionDef::value("package", "Package name"),
        ],
    };

    #[test]
    fn test_render_options() {
        let report = GeneratorsReport {
            backends: vec![BackendInfo {
                name: "demo",
                description: "A demo backend",
                options: &SPEC,
            }],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "demo: A demo backend",
                "  - strict                   Fail on unknown fields",
                "  - package=VALUE            Package name",
            ]
        );
    }
}
