use thriftgen_ast::Program;
use thriftgen_codegen::{
    Result,
    driver::walk_program,
    generation::foreign_programs,
    language::{LanguageCodegen, PreviewFile},
    options::RawOptions,
};
use tracing::debug;

use crate::{
    emit::{JsEmitter, Layout},
    naming::JS_NAMING,
    options::JsOptions,
    type_mapper::JsTypeMapper,
};

/// JavaScript code generator targeting the Apache Thrift node.js and
/// browser runtimes.
///
/// A program becomes `<program>_types.js` plus one `<Service>.js` per
/// service, all in the output root.
pub struct Generator<'a> {
    program: &'a Program,
    options: JsOptions,
    layout: Layout,
    types: JsTypeMapper,
    services: JsTypeMapper,
}

impl<'a> Generator<'a> {
    /// Validate `raw` and prepare the generator.
    pub fn new(program: &'a Program, raw: &RawOptions) -> Result<Self> {
        let options = JsOptions::from_raw(raw)?;
        Ok(Self::with_options(program, options))
    }

    pub fn with_options(program: &'a Program, options: JsOptions) -> Self {
        let namespace = match (options.node, options.with_ns) {
            (false, _) => program.namespace("js").map(str::to_string),
            (true, true) => Some(
                program
                    .namespace("js")
                    .map_or_else(|| program.name.clone(), str::to_string),
            ),
            (true, false) => None,
        };

        let mut types = JsTypeMapper::new(program.name.as_str(), options.node);
        let mut requires = Vec::new();
        for name in foreign_programs(program) {
            let prefix = if options.node {
                let binding = JS_NAMING.safe_name(&format!("{}_ttypes", name));
                requires.push((binding.clone(), format!("./{}_types", name)));
                format!("{}.", binding)
            } else {
                program
                    .find_include(&name)
                    .and_then(|include| include.namespace("js"))
                    .map(|ns| format!("{}.", ns))
                    .unwrap_or_default()
            };
            debug!(program = %name, prefix = %prefix, "resolving included program");
            types = types.with_foreign(name, prefix);
        }

        let local = match (&namespace, options.node) {
            (Some(ns), false) => format!("{}.", ns),
            _ => String::new(),
        };
        types = types.with_local_prefix(local);
        let services = if options.node {
            types.with_local_prefix("ttypes.")
        } else {
            types.clone()
        };

        let layout = Layout {
            types_module: format!("{}_types", JS_NAMING.file_name(&program.name)),
            requires,
            namespace,
        };

        Self {
            program,
            options,
            layout,
            types,
            services,
        }
    }

    pub fn options(&self) -> &JsOptions {
        &self.options
    }
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "js"
    }

    fn file_extension(&self) -> &'static str {
        "js"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let mut emitter = JsEmitter::new(
            self.program,
            &self.options,
            &self.layout,
            &self.types,
            &self.services,
        );
        walk_program(self.program, &mut emitter)?;

        let files = emitter.into_files();
        debug!(
            program = %self.program.name,
            files = files.len(),
            node = self.options.node,
            "rendered javascript sources"
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::testing::{point_program, tutorial_program};

    use super::*;

    fn paths(files: &[PreviewFile]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_one_file_per_service() {
        let program = tutorial_program();
        let generator = Generator::new(&program, &RawOptions::new()).unwrap();
        let files = generator.preview().unwrap();
        assert_eq!(paths(&files), ["tutorial_types.js", "Calculator.js"]);
    }

    #[test]
    fn test_program_without_services() {
        let program = point_program();
        let generator = Generator::new(&program, &"node".parse().unwrap()).unwrap();
        let files = generator.preview().unwrap();
        assert_eq!(paths(&files), ["geometry_types.js"]);
    }

    #[test]
    fn test_node_requires_included_types() {
        let program = tutorial_program();
        let generator = Generator::new(&program, &"node".parse().unwrap()).unwrap();
        assert_eq!(
            generator.layout.requires,
            [("shared_ttypes".to_string(), "./shared_types".to_string())]
        );
        assert_eq!(generator.layout.namespace, None);
    }

    #[test]
    fn test_with_ns_falls_back_to_program_name() {
        let program = point_program();
        let generator = Generator::new(&program, &"node,with_ns".parse().unwrap()).unwrap();
        assert_eq!(generator.layout.namespace.as_deref(), Some("geometry"));
    }
}
