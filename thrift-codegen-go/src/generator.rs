use std::collections::HashSet;

use thriftgen_ast::Program;
use thriftgen_codegen::{
    Result,
    driver::walk_program,
    generation::{ImportCollector, foreign_programs},
    language::{LanguageCodegen, PreviewFile},
    options::RawOptions,
    synthetic::{args_struct_name, result_struct_name},
};
use thriftgen_core::to_snake_case;
use tracing::debug;

use crate::{
    emit::GoEmitter,
    naming::{GO_NAMING, GoScope},
    options::{GoOptions, GoPackage},
    type_mapper::GoTypeMapper,
};

/// Go code generator targeting the Apache Thrift Go runtime.
///
/// One program becomes one file, `<package path>/<program>.go`.
/// Included programs are imported as packages but not generated.
pub struct Generator<'a> {
    program: &'a Program,
    options: GoOptions,
    package: GoPackage,
    mapper: GoTypeMapper,
    imports: ImportCollector,
}

impl<'a> Generator<'a> {
    /// Validate `raw` and prepare the generator.
    pub fn new(program: &'a Program, raw: &RawOptions) -> Result<Self> {
        let options = GoOptions::from_raw(raw)?;
        Ok(Self::with_options(program, options))
    }

    pub fn with_options(program: &'a Program, options: GoOptions) -> Self {
        let package = GoPackage::for_program(program, options.package.as_deref());
        let mut mapper = GoTypeMapper::new(program.name.as_str());
        let mut imports = ImportCollector::new();

        imports.add_module("context");
        imports.add_module("fmt");
        if options.log_unexpected {
            imports.add_module("log");
        }
        imports.add(&options.thrift_import, "thrift");

        let mut taken: HashSet<String> = ["context", "fmt", "log", "thrift"]
            .into_iter()
            .map(String::from)
            .collect();
        taken.insert(package.name.clone());

        for name in foreign_programs(program) {
            let foreign = match program.find_include(&name) {
                Some(include) => GoPackage::for_program(include, None),
                None => GoPackage {
                    path: name.clone(),
                    name: to_snake_case(&name),
                },
            };

            let mut alias = foreign.name.clone();
            let mut n = 1;
            while !taken.insert(alias.clone()) {
                alias = format!("{}{}", foreign.name, n);
                n += 1;
            }

            debug!(program = %name, alias = %alias, "importing package");
            imports.add(&foreign.import_path(&options.package_prefix), &alias);
            mapper = mapper.with_alias(name, alias);
        }

        Self {
            program,
            options,
            package,
            mapper,
            imports,
        }
    }

    pub fn package(&self) -> &GoPackage {
        &self.package
    }

    /// Every package-level identifier the program declares must be
    /// distinct once rendered, and so must the methods of each service.
    fn check_names(&self) -> Result<()> {
        let program = self.program;
        let mut package = GoScope::new();

        for typedef in &program.typedefs {
            package.declare(&typedef.name, GO_NAMING.type_name(&typedef.name))?;
        }
        for def in &program.enums {
            package.declare(&def.name, GO_NAMING.type_name(&def.name))?;
        }
        for constant in &program.consts {
            package.declare(&constant.name, GO_NAMING.type_name(&constant.name))?;
        }
        for def in &program.structs {
            package.declare(&def.name, GO_NAMING.type_name(&def.name))?;
        }
        for service in &program.services {
            let name = GO_NAMING.type_name(&service.name);
            package.declare(&service.name, name.as_str())?;
            package.declare(&format!("{} client", service.name), format!("{}Client", name))?;
            package.declare(
                &format!("{} processor", service.name),
                format!("{}Processor", name),
            )?;

            let mut methods = GoScope::new();
            for function in &service.functions {
                methods.declare(&function.name, GO_NAMING.type_name(&function.name))?;

                for synthetic in [
                    args_struct_name(&service.name, &function.name),
                    result_struct_name(&service.name, &function.name),
                ] {
                    package.declare(&synthetic, GO_NAMING.type_name(&synthetic))?;
                }
            }
        }
        Ok(())
    }

    fn file_path(&self) -> String {
        format!(
            "{}/{}.go",
            self.package.path,
            GO_NAMING.file_name(&self.program.name)
        )
    }
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        self.check_names()?;

        let mut emitter = GoEmitter::new(
            self.program,
            &self.options,
            &self.mapper,
            &self.imports,
            &self.package,
        );
        walk_program(self.program, &mut emitter)?;

        let path = self.file_path();
        debug!(path = %path, "rendered go source");
        Ok(vec![PreviewFile::new(path, emitter.into_source())])
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_codegen::testing::{point_program, tutorial_program};

    use super::*;

    #[test]
    fn test_file_path_follows_namespace() {
        let program = tutorial_program();
        let generator = Generator::new(&program, &RawOptions::new()).unwrap();
        let files = generator.preview().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "tutorial/tutorial.go");
    }

    #[test]
    fn test_package_option_overrides_namespace() {
        let program = point_program();
        let raw = RawOptions::new().with("package", Some("geo.shapes"));
        let generator = Generator::new(&program, &raw).unwrap();
        assert_eq!(generator.package().name, "shapes");
        assert_eq!(generator.file_path(), "geo/shapes/geometry.go");
    }

    #[test]
    fn test_tutorial_names_are_distinct() {
        let program = tutorial_program();
        let generator = Generator::new(&program, &RawOptions::new()).unwrap();
        generator.check_names().unwrap();
    }

    #[test]
    fn test_call_structs_share_the_package_scope() {
        use thriftgen_ast::{Function, Service, Struct, Type};

        let mut program = Program::new("calls");
        program.structs.push(Struct::new("CalcAddArgs"));
        program
            .services
            .push(Service::new("Calc").function(Function::new("add", Type::I32)));
        let generator = Generator::new(&program, &RawOptions::new()).unwrap();
        let err = generator.check_names().unwrap_err();
        assert_eq!(
            err.to_string(),
            "'CalcAddArgs' and 'Calc_add_args' both render as 'CalcAddArgs'"
        );
    }

    #[test]
    fn test_includes_are_imported_with_prefix() {
        let program = tutorial_program();
        let raw = RawOptions::new().with("package_prefix", Some("example.com/gen"));
        let generator = Generator::new(&program, &raw).unwrap();
        assert!(
            generator
                .imports
                .has_symbol("example.com/gen/shared", "shared")
        );
        assert!(generator.imports.has_module("context"));
        assert!(!generator.imports.has_module("log"));
    }
}
