//! Error types for slides2pdf

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for slides2pdf
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source directory does not exist
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Source path exists but is not a directory
    #[error("Source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Source directory holds no slide files
    #[error("No HTML files found in: {}", .0.display())]
    NoHtmlFiles(PathBuf),

    /// Headless browser could not be located or started
    #[error(
        "Headless Chrome is not available: {detail}\n\
         To fix this:\n  \
         1. Install Google Chrome or Chromium.\n  \
         2. If it is installed somewhere unusual, pass --chrome <PATH> or set CHROME.\n  \
         3. When running as root or inside a container, add --no-sandbox."
    )]
    RendererUnavailable { detail: String },

    /// A single slide failed to render
    #[error("Failed to render {}: {detail}", .path.display())]
    Render { path: PathBuf, detail: String },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// The merged PDF could not be written
    #[error("Cannot write output {}: {detail}", .path.display())]
    OutputWrite { path: PathBuf, detail: String },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// `2` missing source directory, `3` no slides, `4` browser unavailable,
    /// `5` output not writable, `1` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::SourceNotFound(_) | Error::NotADirectory(_) => 2,
            Error::NoHtmlFiles(_) => 3,
            Error::RendererUnavailable { .. } => 4,
            Error::OutputWrite { .. } => 5,
            _ => 1,
        }
    }
}
