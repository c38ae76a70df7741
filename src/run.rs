//! End-to-end conversion: discover, render, merge, clean up

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{debug, info};

use crate::discover::find_html_files;
use crate::error::{Error, Result};
use crate::pdf::{count_pages, merge_pdfs, MergeOptions};
use crate::render::{render_slides, SlideRenderer};

/// Default source directory, relative to the base directory
pub const DEFAULT_SOURCE: &str = "source";

/// Default output file, relative to the base directory
pub const DEFAULT_OUTPUT: &str = "output.pdf";

/// Options for a single conversion run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory containing the HTML slides
    pub source_dir: PathBuf,
    /// Merged PDF path; overwritten if it exists
    pub output_path: PathBuf,
    /// Keep the per-slide PDFs instead of deleting them
    pub keep_temp: bool,
}

impl RunOptions {
    /// Build options with `source` and `output` resolved against `base_dir`
    pub fn resolve(base_dir: &Path, source: &Path, output: &Path, keep_temp: bool) -> Self {
        Self {
            source_dir: base_dir.join(source),
            output_path: base_dir.join(output),
            keep_temp,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Slides in the order they were merged
    pub inputs: Vec<PathBuf>,
    /// The merged PDF
    pub output_path: PathBuf,
    /// Pages in the merged PDF
    pub page_count: usize,
    /// Per-slide PDFs left on disk; `None` unless `keep_temp` was set
    pub kept: Option<Vec<PathBuf>>,
}

/// Directory containing the running executable, used as the default base
/// for relative `--source` and `--output` paths.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::General(format!("Executable has no parent directory: {}", exe.display())))
}

/// Convert the slides in `options.source_dir` into one PDF.
///
/// `launch` is only called once slides have been found, so a missing
/// browser never masks a missing source directory. Per-slide PDFs live in a
/// temporary directory that is removed on every exit path, unless
/// `keep_temp` is set and the merge succeeded. Progress lines go to `out`.
pub fn run<R, F, W>(options: &RunOptions, launch: F, out: &mut W) -> Result<RunReport>
where
    R: SlideRenderer,
    F: FnOnce() -> Result<R>,
    W: Write,
{
    let source_dir = absolute(&options.source_dir)?;
    let output_path = absolute(&options.output_path)?;

    let inputs = find_html_files(&source_dir)?;

    writeln!(out, "Found {} HTML file(s):", inputs.len())?;
    for html in &inputs {
        let name = html.file_name().unwrap_or(html.as_os_str());
        writeln!(out, "  - {}", name.to_string_lossy())?;
    }

    let temp_dir = Builder::new().prefix("slides2pdf-").tempdir()?;
    debug!(dir = %temp_dir.path().display(), "created temporary directory");

    writeln!(out, "Rendering HTML to PDF with headless Chrome...")?;
    let mut renderer = launch()?;
    let pdf_files = render_slides(&mut renderer, &inputs, temp_dir.path())?;
    drop(renderer);

    writeln!(out, "Merging {} PDF file(s)...", pdf_files.len())?;
    merge_pdfs(&MergeOptions {
        input_paths: pdf_files.clone(),
        output_path: output_path.clone(),
    })?;
    let page_count = count_pages(&output_path)?;
    info!(output = %output_path.display(), pages = page_count, "merged slides");

    let kept = if options.keep_temp {
        let dir = temp_dir.keep();
        debug!(dir = %dir.display(), "keeping temporary directory");
        writeln!(out, "Kept temporary PDFs:")?;
        for pdf in &pdf_files {
            writeln!(out, "  - {}", pdf.display())?;
        }
        Some(pdf_files)
    } else {
        temp_dir.close()?;
        writeln!(out, "Temporary files deleted. Output: {}", output_path.display())?;
        None
    };

    writeln!(out, "Done.")?;

    Ok(RunReport {
        inputs,
        output_path,
        page_count,
        kept,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
