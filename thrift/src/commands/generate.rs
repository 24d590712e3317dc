use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use thriftgen_codegen::options::GeneratorSpec;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Output, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// AST document to generate from (.json or .toml)
    pub input: PathBuf,

    /// Generator and options, e.g. `go:package=tutorial,strict` (repeatable)
    #[arg(short = 'g', long = "gen", value_name = "SPEC", required = true)]
    pub generators: Vec<GeneratorSpec>,

    /// Output directory (defaults to gen-<generator>)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Also generate every included program
    #[arg(short, long)]
    pub recurse: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let program = thriftgen_loader::load_file(&self.input).unwrap_or_exit();
        let opts = GenerateOptions {
            output_dir: self.out.clone(),
            dry_run: self.dry_run,
            recurse: self.recurse,
        };

        let reports = ops::generate(&program, &self.generators, &opts)?;

        let mut out = TerminalOutput::new();
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            report.render(&mut out);
        }
        Ok(())
    }
}
