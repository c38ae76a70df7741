//! Slide discovery
//!
//! Slides are `pageNN.html` files in the source directory. When none follow
//! that convention, every `*.html` file is used instead. Either way the
//! result is sorted by file name, which fixes the page order of the merged PDF.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::{Error, Result};

/// Numbered slide files, e.g. `page01.html`
pub const NUMBERED_PATTERN: &str = "page*.html";

/// Fallback used when no numbered slides exist
pub const FALLBACK_PATTERN: &str = "*.html";

/// Find the slide files in `source_dir`, in merge order.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if the directory does not exist
/// - [`Error::NotADirectory`] if the path is a file
/// - [`Error::NoHtmlFiles`] if neither pattern matches anything
pub fn find_html_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.exists() {
        return Err(Error::SourceNotFound(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(Error::NotADirectory(source_dir.to_path_buf()));
    }

    let numbered = Pattern::new(NUMBERED_PATTERN).map_err(|e| Error::General(e.to_string()))?;
    let fallback = Pattern::new(FALLBACK_PATTERN).map_err(|e| Error::General(e.to_string()))?;

    let candidates = list_files(source_dir)?;

    let mut files: Vec<PathBuf> = candidates
        .iter()
        .filter(|path| is_numbered_slide(path, &numbered))
        .cloned()
        .collect();

    if files.is_empty() {
        debug!(dir = %source_dir.display(), "no numbered slides, falling back to {}", FALLBACK_PATTERN);
        files = candidates
            .into_iter()
            .filter(|path| matches_name(path, &fallback))
            .collect();
    }

    if files.is_empty() {
        return Err(Error::NoHtmlFiles(source_dir.to_path_buf()));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Regular files directly inside `dir`
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Hidden files (`.draft.html`, editor lock files) never match a wildcard
fn matches_name(path: &Path, pattern: &Pattern) -> bool {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| pattern.matches_with(name, options))
        .unwrap_or(false)
}

/// `page` followed by digits only, so `page-notes.html` stays out
fn is_numbered_slide(path: &Path, pattern: &Pattern) -> bool {
    if !matches_name(path, pattern) {
        return false;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_prefix("page"))
        .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "<html></html>").expect("Failed to write file");
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_numbered_slides_take_priority() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "page02.html");
        touch(dir.path(), "notes.html");
        touch(dir.path(), "page01.html");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["page01.html", "page02.html"]);
    }

    #[test]
    fn test_other_extensions_ignored() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "page01.html");
        touch(dir.path(), "page02.htm");
        touch(dir.path(), "page03.pdf");
        touch(dir.path(), "page04.html.bak");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["page01.html"]);
    }

    #[test]
    fn test_fallback_to_all_html() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "summary.html");
        touch(dir.path(), "intro.html");
        touch(dir.path(), "readme.txt");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["intro.html", "summary.html"]);
    }

    #[test]
    fn test_hidden_files_skipped() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), ".draft.html");
        touch(dir.path(), ".#intro.html");
        touch(dir.path(), "intro.html");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["intro.html"]);
    }

    #[test]
    fn test_only_hidden_files_is_empty() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), ".draft.html");

        let result = find_html_files(dir.path());
        assert!(matches!(result.unwrap_err(), Error::NoHtmlFiles(_)));
    }

    #[test]
    fn test_non_numeric_page_prefix_uses_fallback() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "pages.html");
        touch(dir.path(), "cover.html");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["cover.html", "pages.html"]);
    }

    #[test]
    fn test_lexical_not_numeric_order() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "page10.html");
        touch(dir.path(), "page9.html");
        touch(dir.path(), "page1.html");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["page1.html", "page10.html", "page9.html"]);
    }

    #[test]
    fn test_directories_are_skipped() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("page00.html")).unwrap();
        touch(dir.path(), "page01.html");

        let files = find_html_files(dir.path()).expect("discovery failed");
        assert_eq!(names(&files), vec!["page01.html"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let result = find_html_files(&dir.path().join("nope"));
        assert!(matches!(result.unwrap_err(), Error::SourceNotFound(_)));
    }

    #[test]
    fn test_source_is_a_file() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "page01.html");
        let result = find_html_files(&dir.path().join("page01.html"));
        assert!(matches!(result.unwrap_err(), Error::NotADirectory(_)));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        touch(dir.path(), "notes.txt");
        let result = find_html_files(dir.path());
        assert!(matches!(result.unwrap_err(), Error::NoHtmlFiles(_)));
    }
}
