//! HTML report generator
//!
//! Renders a self-contained page (inline CSS, no scripts) through an askama
//! template, so user-entered names are HTML-escaped. The same page feeds the
//! PDF generator.

use crate::core::report::{
    write_report, ExportError, ReportContext, ReportGenerator, REPORT_FOOTER, REPORT_TITLE,
};
use askama::Template;
use std::path::Path;

/// Compiled `templates/report.html`
#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReportTemplate<'a> {
    title: &'a str,
    footer: &'a str,
    ctx: &'a ReportContext,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ExportError> {
        let report_content = self.render(ctx)?;
        write_report(output_path, &report_content)
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, ExportError> {
        let template = HtmlReportTemplate {
            title: REPORT_TITLE,
            footer: REPORT_FOOTER,
            ctx,
        };
        Ok(template.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::tests::{sample_date, sample_session};

    #[test]
    fn test_renders_summary_and_tables() {
        let ctx = ReportContext::from_session(&sample_session(), sample_date()).expect("context");
        let html = HtmlReporter::new().render(&ctx).expect("render");

        assert!(html.contains("<h1>Cumulative GWA Summary Report</h1>"));
        assert!(html.contains("Generated on: March 5, 2025"));
        assert!(html.contains(r#"<td class="num" id="cumulative-gwa">1.70</td>"#));
        assert!(html.contains(r#"<td class="num" id="total-units">13</td>"#));
        assert!(html.contains("<h3>2nd Year - 1st Semester</h3>"));
        assert!(html.contains("Semester GWA: 1.79"));
        assert!(html.contains(REPORT_FOOTER));
    }

    #[test]
    fn test_escapes_user_text() {
        let mut session = sample_session();
        session.set_student_name("<script>alert(1)</script>");
        session.set_school_name("");
        let ctx = ReportContext::from_session(&session, sample_date()).expect("context");
        let html = HtmlReporter::new().render(&ctx).expect("render");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("School:"));
    }
}
