//! slides2pdf Library
//!
//! Turns a directory of HTML slides into a single PDF.
//! This library provides functionality to:
//! - Discover slide files (`pageNN.html`, falling back to `*.html`)
//! - Render each slide to PDF with headless Chrome
//! - Merge the per-slide PDFs in order
//! - Run the whole pipeline with a scoped temporary directory
//!
//! # Example
//!
//! ```no_run
//! use slides2pdf::render::{ChromeOptions, ChromeRenderer};
//! use slides2pdf::run::{run, RunOptions};
//! use std::path::PathBuf;
//!
//! let options = RunOptions {
//!     source_dir: PathBuf::from("deck/source"),
//!     output_path: PathBuf::from("deck/slides.pdf"),
//!     keep_temp: false,
//! };
//!
//! let chrome = ChromeOptions::default();
//! run(&options, || ChromeRenderer::launch(&chrome), &mut std::io::stdout())
//!     .expect("Failed to convert slides");
//! ```

pub mod discover;
pub mod error;
pub mod logging;
pub mod pdf;
pub mod render;
pub mod run;

// Re-export commonly used items
pub use error::{Error, Result};
