//! PDF report generator via HTML-to-PDF conversion
//!
//! Renders the HTML report to a temporary file, then prints it to PDF with
//! headless Chrome/Chromium (auto-detected or given explicitly).

use super::html::HtmlReporter;
use crate::core::report::{ExportError, ReportContext, ReportGenerator};
use std::path::Path;
use std::process::{Command, Stdio};

/// Browsers tried in order when no converter is configured
const CHROME_CANDIDATES: [&str; 8] = [
    "google-chrome",
    "chrome",
    "chromium",
    "chromium-browser",
    "google-chrome-stable",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
];

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    /// Optional custom converter command
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a PDF reporter that auto-detects Chrome/Chromium
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with a custom converter
    #[must_use]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    /// First candidate that answers `--version`
    fn detect_chrome() -> Option<&'static str> {
        CHROME_CANDIDATES.into_iter().find(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .output()
                .is_ok_and(|output| output.status.success())
        })
    }

    /// Print `html_path` to `pdf_path`
    fn html_to_pdf_chrome(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), ExportError> {
        let html_url = html_path
            .canonicalize()
            .map_err(|e| ExportError::Pdf(format!("cannot resolve {}: {e}", html_path.display())))?;

        logger::debug!("Converting {} with {chrome_cmd}", html_url.display());

        // Chrome is noisy on stderr (DBus, GPU); its exit status is what matters
        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--run-all-compositor-stages-before-draw")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_url.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| ExportError::Pdf(format!("failed to run {chrome_cmd}: {e}")))?;

        if !status.success() {
            return Err(ExportError::Pdf(format!("{chrome_cmd} exited with {status}")));
        }

        Ok(())
    }

    /// Convert an HTML report to PDF
    fn convert_html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), ExportError> {
        if let Some(converter) = &self.converter {
            return Self::html_to_pdf_chrome(converter, html_path, pdf_path);
        }

        if let Some(chrome) = Self::detect_chrome() {
            return Self::html_to_pdf_chrome(chrome, html_path, pdf_path);
        }

        Err(ExportError::Pdf(
            "Chrome/Chromium not found.\n\
            \n\
            To generate PDF reports, install Chrome or Chromium:\n\
            \n\
            • Ubuntu/Debian:  sudo apt install chromium-browser\n\
            • Fedora/RHEL:    sudo dnf install chromium\n\
            • macOS:          brew install --cask google-chrome\n\
            • Windows:        Download from https://www.google.com/chrome/\n\
            \n\
            Alternatively, specify a converter:\n\
              gwacalc report --format pdf --pdf-converter /path/to/chrome\n\
              or export HTML and print it to PDF from a browser"
                .to_string(),
        ))
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ExportError> {
        let html_path =
            std::env::temp_dir().join(format!("gwacalc_report_{}.html", std::process::id()));
        HtmlReporter::new().generate(ctx, &html_path)?;

        let result = self.convert_html_to_pdf(&html_path, output_path);

        if let Err(e) = std::fs::remove_file(&html_path) {
            logger::debug!("Could not remove {}: {e}", html_path.display());
        }

        result
    }

    /// PDF has no text form; this returns the HTML it would be printed from
    fn render(&self, ctx: &ReportContext) -> Result<String, ExportError> {
        HtmlReporter::new().render(ctx)
    }
}
