//! Rendering HTML slides to PDF with headless Chrome
//!
//! One browser and one tab are launched per run and reused for every slide.
//! Slides are rendered strictly in order; the first failure aborts the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

/// Something that can turn one HTML file into one PDF file
pub trait SlideRenderer {
    /// Render `html` and write the resulting PDF to `pdf`
    fn render(&mut self, html: &Path, pdf: &Path) -> Result<()>;
}

/// Render every input into `out_dir`, returning the PDF paths in input order.
///
/// Each PDF is named after its slide, so `page01.html` becomes
/// `out_dir/page01.pdf`.
pub fn render_slides<R: SlideRenderer + ?Sized>(
    renderer: &mut R,
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut pdf_paths = Vec::with_capacity(inputs.len());

    for html in inputs {
        let stem = html
            .file_stem()
            .ok_or_else(|| Error::General(format!("Not a file name: {}", html.display())))?;
        let mut file_name = stem.to_os_string();
        file_name.push(".pdf");
        let out_pdf = out_dir.join(file_name);

        debug!(input = %html.display(), output = %out_pdf.display(), "rendering slide");
        renderer.render(html, &out_pdf)?;
        pdf_paths.push(out_pdf);
    }

    Ok(pdf_paths)
}

/// Options for launching the browser
#[derive(Debug, Clone)]
pub struct ChromeOptions {
    /// Browser executable; auto-detected when `None`
    pub executable: Option<PathBuf>,
    /// Launch with the Chrome sandbox enabled
    pub sandbox: bool,
    /// Extra quiet period after navigation settles (network almost idle)
    /// before taking the snapshot
    pub settle: Duration,
    /// Per-page navigation timeout
    pub timeout: Duration,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            executable: None,
            sandbox: true,
            settle: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`SlideRenderer`] backed by a single headless Chrome tab
pub struct ChromeRenderer {
    tab: Arc<Tab>,
    // Keeps the browser process alive for as long as the tab is in use.
    _browser: Browser,
    settle: Duration,
}

impl ChromeRenderer {
    /// Locate and start the browser, then open the tab used for every slide.
    ///
    /// Any failure here is reported as [`Error::RendererUnavailable`] since
    /// nothing has been rendered yet and the fix is on the user's side.
    pub fn launch(options: &ChromeOptions) -> Result<Self> {
        let executable = resolve_executable(options.executable.as_deref())?;
        info!(executable = %executable.display(), "launching headless Chrome");

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(options.sandbox)
            .path(Some(executable))
            .idle_browser_timeout(options.timeout + options.settle + Duration::from_secs(30))
            .build()
            .map_err(|e| Error::RendererUnavailable { detail: e.to_string() })?;

        let browser = Browser::new(launch_options).map_err(unavailable)?;
        let tab = browser.new_tab().map_err(unavailable)?;
        tab.set_default_timeout(options.timeout);

        Ok(Self {
            tab,
            _browser: browser,
            settle: options.settle,
        })
    }
}

impl SlideRenderer for ChromeRenderer {
    fn render(&mut self, html: &Path, pdf: &Path) -> Result<()> {
        let url = file_url(html)?;

        // wait_until_navigated returns once the page reports networkAlmostIdle
        self.tab
            .navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| render_failed(html, e))?;

        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }

        let bytes = self
            .tab
            .print_to_pdf(Some(PrintToPdfOptions {
                print_background: Some(true),
                ..Default::default()
            }))
            .map_err(|e| render_failed(html, e))?;

        fs::write(pdf, bytes)?;
        Ok(())
    }
}

fn resolve_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::RendererUnavailable {
            detail: format!("browser executable not found at {}", path.display()),
        }),
        None => headless_chrome::browser::default_executable()
            .map_err(|detail| Error::RendererUnavailable { detail }),
    }
}

/// `file://` URL for a local slide
fn file_url(html: &Path) -> Result<Url> {
    let absolute = html.canonicalize()?;
    Url::from_file_path(&absolute).map_err(|()| Error::Render {
        path: html.to_path_buf(),
        detail: "cannot express path as a file:// URL".to_string(),
    })
}

fn unavailable(err: anyhow::Error) -> Error {
    Error::RendererUnavailable { detail: format!("{:#}", err) }
}

fn render_failed(html: &Path, err: anyhow::Error) -> Error {
    Error::Render {
        path: html.to_path_buf(),
        detail: format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writes the slide name as the "PDF" and can be told to fail on one slide
    struct Recorder {
        seen: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl SlideRenderer for Recorder {
        fn render(&mut self, html: &Path, pdf: &Path) -> Result<()> {
            let name = html.file_name().unwrap().to_string_lossy().into_owned();
            if self.fail_on == Some(name.as_str()) {
                return Err(Error::Render { path: html.to_path_buf(), detail: "boom".into() });
            }
            fs::write(pdf, name.as_bytes())?;
            self.seen.push(name);
            Ok(())
        }
    }

    #[test]
    fn test_render_slides_preserves_order_and_names() {
        let out = TempDir::new().expect("Failed to create temp directory");
        let inputs = vec![PathBuf::from("/slides/page01.html"), PathBuf::from("/slides/page02.html")];
        let mut recorder = Recorder { seen: vec![], fail_on: None };

        let pdfs = render_slides(&mut recorder, &inputs, out.path()).expect("render failed");

        assert_eq!(pdfs, vec![out.path().join("page01.pdf"), out.path().join("page02.pdf")]);
        assert_eq!(recorder.seen, vec!["page01.html", "page02.html"]);
        assert_eq!(fs::read_to_string(&pdfs[1]).unwrap(), "page02.html");
    }

    #[test]
    fn test_render_failure_aborts_remaining() {
        let out = TempDir::new().expect("Failed to create temp directory");
        let inputs = vec![
            PathBuf::from("a.html"),
            PathBuf::from("b.html"),
            PathBuf::from("c.html"),
        ];
        let mut recorder = Recorder { seen: vec![], fail_on: Some("b.html") };

        let result = render_slides(&mut recorder, &inputs, out.path());

        assert!(matches!(result, Err(Error::Render { .. })));
        assert_eq!(recorder.seen, vec!["a.html"]);
        assert!(!out.path().join("c.pdf").exists());
    }

    #[test]
    fn test_file_url_is_absolute() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let html = dir.path().join("page 01.html");
        fs::write(&html, "<html></html>").unwrap();

        let url = file_url(&html).expect("url failed");
        assert_eq!(url.scheme(), "file");
        assert!(url.as_str().ends_with("page%2001.html"));
    }

    #[test]
    fn test_missing_explicit_executable_is_unavailable() {
        let result = resolve_executable(Some(Path::new("/definitely/not/chrome")));
        assert!(matches!(result, Err(Error::RendererUnavailable { .. })));
    }
}
