//! Check command report data structures.

use std::path::PathBuf;

use thriftgen_ast::Program;

use super::output::{Output, Report};

/// Report data from document validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the checked document.
    pub input: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Declaration counts of the root program.
    pub stats: ProgramStats,
}

/// Declaration counts of one program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramStats {
    pub name: String,
    pub includes: Vec<String>,
    pub typedefs: usize,
    pub enums: usize,
    pub consts: usize,
    pub structs: usize,
    pub services: usize,
    pub functions: usize,
}

impl ProgramStats {
    pub fn of(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            includes: program.includes.iter().map(|p| p.name.clone()).collect(),
            typedefs: program.typedefs.len(),
            enums: program.enums.len(),
            consts: program.consts.len(),
            structs: program.structs.len(),
            services: program.services.len(),
            functions: program.services.iter().map(|s| s.functions.len()).sum(),
        }
    }
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            let count = self.errors.len();
            out.preformatted(&format!(
                "✗ {} has {} error{}",
                self.input.display(),
                count,
                if count == 1 { "" } else { "s" }
            ));
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();

        let stats = &self.stats;
        out.key_value("Program", &stats.name);
        if !stats.includes.is_empty() {
            out.key_value("Includes", &stats.includes.join(", "));
        }
        out.section("Declarations");
        for (label, count) in [
            ("typedefs", stats.typedefs),
            ("enums", stats.enums),
            ("constants", stats.consts),
            ("structs", stats.structs),
            ("services", stats.services),
            ("functions", stats.functions),
        ] {
            if count > 0 {
                out.list_item(&format!("{} {}", count, label));
            }
        }
    }
}
