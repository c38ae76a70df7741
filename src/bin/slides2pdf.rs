//! slides2pdf CLI tool
//!
//! Renders numbered HTML slides with headless Chrome and merges them into one PDF.

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*};

use slides2pdf::logging::env_filter;
use slides2pdf::render::{ChromeOptions, ChromeRenderer};
use slides2pdf::run::{executable_dir, run, RunOptions, DEFAULT_OUTPUT, DEFAULT_SOURCE};

/// slides2pdf - Merge HTML slides (pageNN.html) into a single PDF
#[derive(Parser)]
#[command(name = "slides2pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Convert ./source/page*.html next to the binary into ./output.pdf
    slides2pdf

    # Explicit folders, keeping the per-slide PDFs
    slides2pdf --base-dir . -s deck -o deck.pdf --keep-temp

    # Use a specific browser inside a container
    slides2pdf --chrome /usr/bin/chromium --no-sandbox

EXIT CODES:
    0  success
    2  source directory missing or not a directory
    3  no HTML files found
    4  headless Chrome unavailable
    5  output file could not be written")]
struct Cli {
    /// Folder containing the HTML slides
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Output PDF file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Keep the per-slide PDFs instead of deleting them
    #[arg(long)]
    keep_temp: bool,

    /// Directory relative paths are resolved against [default: the executable's directory]
    #[arg(long, env = "SLIDES2PDF_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Chrome/Chromium executable [default: auto-detect]
    #[arg(long, env = "CHROME")]
    chrome: Option<PathBuf>,

    /// Extra milliseconds to wait once the page's network is almost idle, before printing
    #[arg(long, default_value_t = 500)]
    settle_ms: u64,

    /// Per-page navigation timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Launch Chrome without its sandbox (needed as root or in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter(cli.verbose))
        .try_init();

    let base_dir = match cli.base_dir {
        Some(dir) => Ok(dir),
        None => executable_dir(),
    };
    let base_dir = match base_dir {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    let options = RunOptions::resolve(&base_dir, &cli.source, &cli.output, cli.keep_temp);
    let chrome = ChromeOptions {
        executable: cli.chrome,
        sandbox: !cli.no_sandbox,
        settle: Duration::from_millis(cli.settle_ms),
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    let mut stdout = io::stdout();
    if let Err(e) = run(&options, || ChromeRenderer::launch(&chrome), &mut stdout) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
