//! Generate command report data structures.

use std::path::{Path, PathBuf};

use thriftgen_codegen::language::PreviewFile;

use super::output::{Output, Report};

/// Report data from one `--gen` run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Backend name.
    pub backend: String,
    /// Programs that were generated, root first.
    pub programs: Vec<String>,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files created or rewritten.
    pub written: Vec<PathBuf>,
    /// Files that already had the generated content.
    pub unchanged: Vec<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value(
            &format!("Generated {} ({})", self.backend, self.programs.join(", ")),
            &written.output_dir.display().to_string(),
        );
        for path in &written.written {
            out.added_item(&display_relative(path, written));
        }
        for path in &written.unchanged {
            out.unchanged_item(&display_relative(path, written));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        let count = preview.files.len();
        out.preformatted(&format!(
            "{} {} file{} would be generated",
            count,
            self.backend,
            if count == 1 { "" } else { "s" }
        ));
    }
}

fn display_relative(path: &Path, written: &WrittenResult) -> String {
    path.strip_prefix(&written.output_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            backend: "go".to_string(),
            programs: vec!["tutorial".to_string(), "shared".to_string()],
            warnings: vec!["oneway function 'zip' ignores its result".to_string()],
            result,
        }
    }

    #[test]
    fn test_render_written() {
        let report = report(GenerationResult::Written(WrittenResult {
            output_dir: PathBuf::from("gen-go"),
            written: vec![PathBuf::from("gen-go/tutorial/tutorial.go")],
            unchanged: vec![PathBuf::from("gen-go/shared/shared.go")],
        }));
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "warning: oneway function 'zip' ignores its result",
                "Generated go (tutorial, shared): gen-go",
                "  + tutorial/tutorial.go",
                "  = shared/shared.go",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = report(GenerationResult::Preview(PreviewResult {
            files: vec![PreviewFile::new("tutorial.json", "{}\n")],
        }));
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[1], "── tutorial.json ──");
        assert_eq!(out.lines[2], "{}\n");
        assert_eq!(out.lines[4], "1 go file would be generated");
    }
}
