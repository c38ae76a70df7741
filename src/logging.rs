//! Log filter setup for the CLI

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Filter built from `RUST_LOG` when it is set and valid, otherwise from
/// `--verbose` (DEBUG) or the WARN default.
pub fn env_filter(verbose: bool) -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), verbose)
}

fn filter_from(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            let level = if verbose { Level::DEBUG } else { Level::WARN };
            EnvFilter::new(level.to_string())
        })
}
