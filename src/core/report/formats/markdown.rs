//! Markdown report generator
//!
//! Produces plain Markdown tables that render in GitHub, GitLab and most editors.

use crate::core::report::{
    write_report, ExportError, ReportContext, ReportGenerator, SemesterReport, REPORT_FOOTER,
    REPORT_TITLE,
};
use std::fmt::Write;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Header
        output = output.replace("{{title}}", REPORT_TITLE);
        output = output.replace("{{student_name}}", &escape_cell(&ctx.student_name));
        let school_line = ctx
            .school_name
            .as_deref()
            .map_or_else(String::new, |school| {
                format!("**School:** {}\n", escape_cell(school))
            });
        output = output.replace("{{school_line}}", &school_line);
        output = output.replace("{{generated_on}}", &ctx.generated_on_text());

        // Summary
        output = output.replace("{{cumulative_gwa}}", &ctx.cumulative_gwa_text());
        output = output.replace("{{total_units}}", &ctx.total_units_text());
        output = output.replace(
            "{{active_semesters}}",
            &ctx.summary.active_semesters.to_string(),
        );
        output = output.replace("{{range_label}}", &ctx.range_label);

        let semesters: String = ctx.semesters.iter().map(Self::semester_table).collect();
        output = output.replace("{{semesters}}", &semesters);
        output = output.replace("{{footer}}", REPORT_FOOTER);

        output
    }

    /// One heading plus subject table for a semester
    fn semester_table(semester: &SemesterReport) -> String {
        let mut table = String::new();

        let _ = writeln!(table, "### {}\n", semester.label);
        table.push_str("| Subject | Grade | Units | Grade × Units |\n");
        table.push_str("|---|---:|---:|---:|\n");

        for row in &semester.rows {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                escape_cell(&row.name),
                row.grade,
                row.units,
                row.grade_units
            );
        }

        let _ = writeln!(
            table,
            "| **TOTAL** | | **{}** | **{}** |",
            semester.units_text(),
            semester.grade_points_text()
        );
        let _ = writeln!(table, "\n**Semester GWA:** {}\n", semester.gwa_text());

        table
    }
}

/// Keep user text from breaking table cells
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ExportError> {
        let report_content = self.render(ctx)?;
        write_report(output_path, &report_content)
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, ExportError> {
        Ok(self.render_template(ctx))
    }
}
