//! Generate operation - code generation from a loaded program.

use std::path::PathBuf;

use eyre::{Context, Result};
use thriftgen_ast::Program;
use thriftgen_codegen::{
    language::{PreviewFile, write_files},
    options::GeneratorSpec,
    pipeline::{CompilationContext, Pipeline},
};
use tracing::{debug, info};

use crate::{
    language::Backend,
    reports::{GenerateReport, GenerationResult, PreviewResult, WrittenResult},
};

/// Options for the generate operation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output directory; the backend's `gen-<name>` when unset.
    pub output_dir: Option<PathBuf>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to also generate every included program.
    pub recurse: bool,
}

/// One backend's rendered output, not yet written.
struct Rendered<'p> {
    backend: Backend,
    programs: Vec<&'p Program>,
    files: Vec<PreviewFile>,
}

/// Execute the generate operation, one report per generator spec.
///
/// Every spec is resolved and every file rendered before the first one is
/// written, so any failure leaves the output directories untouched.
pub fn generate(
    program: &Program,
    specs: &[GeneratorSpec],
    opts: &GenerateOptions,
) -> Result<Vec<GenerateReport>> {
    let backends = specs
        .iter()
        .map(|spec| Backend::from_name(&spec.language))
        .collect::<thriftgen_codegen::Result<Vec<_>>>()?;

    let ctx = Pipeline::new()
        .run(program.clone())
        .wrap_err("Validation failed")?;
    let warnings = warning_messages(&ctx);

    let mut rendered = Vec::with_capacity(specs.len());
    for (backend, spec) in backends.into_iter().zip(specs) {
        rendered.push(render(&ctx.program, backend, spec, opts.recurse)?);
    }

    let mut reports = Vec::with_capacity(rendered.len());
    for r in rendered {
        let result = if opts.dry_run {
            GenerationResult::Preview(PreviewResult { files: r.files })
        } else {
            write(r.backend, r.files, opts)?
        };
        reports.push(GenerateReport {
            backend: r.backend.name().to_string(),
            programs: r.programs.iter().map(|p| p.name.clone()).collect(),
            warnings: warnings.clone(),
            result,
        });
    }
    Ok(reports)
}

fn render<'p>(
    root: &'p Program,
    backend: Backend,
    spec: &GeneratorSpec,
    recurse: bool,
) -> Result<Rendered<'p>> {
    let programs = targets(root, recurse);
    let generators = programs
        .iter()
        .map(|p| backend.generator(p, &spec.options))
        .collect::<thriftgen_codegen::Result<Vec<_>>>()?;
    debug!(%backend, programs = programs.len(), "generators ready");

    let mut files = Vec::new();
    for generator in &generators {
        files.extend(generator.preview()?);
    }
    Ok(Rendered {
        backend,
        programs,
        files,
    })
}

fn write(
    backend: Backend,
    files: Vec<PreviewFile>,
    opts: &GenerateOptions,
) -> Result<GenerationResult> {
    let output_dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| backend.default_out_dir());
    let result = write_files(files, &output_dir)
        .wrap_err_with(|| format!("Failed to generate {} code", backend))?;
    info!(
        %backend,
        written = result.written.len(),
        unchanged = result.unchanged.len(),
        "generation finished"
    );
    Ok(GenerationResult::Written(WrittenResult {
        output_dir,
        written: result.written,
        unchanged: result.unchanged,
    }))
}

fn warning_messages(ctx: &CompilationContext) -> Vec<String> {
    ctx.warnings()
        .map(|d| match &d.location {
            Some(loc) => format!("{} ({})", d.message, loc),
            None => d.message.clone(),
        })
        .collect()
}

/// The root program, then each included program once, depth first.
fn targets(root: &Program, recurse: bool) -> Vec<&Program> {
    let mut out = vec![root];
    if recurse {
        collect_includes(root, &mut out);
    }
    out
}

fn collect_includes<'a>(program: &'a Program, out: &mut Vec<&'a Program>) {
    for include in &program.includes {
        if out.iter().any(|p| p.name == include.name) {
            continue;
        }
        out.push(include);
        collect_includes(include, out);
    }
}
